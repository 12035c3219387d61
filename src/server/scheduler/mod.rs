//! Cron jobs running alongside the bot.

pub mod cooldown_sweep;
