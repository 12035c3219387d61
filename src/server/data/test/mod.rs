mod guild_config;
mod ticket;
mod ticket_cooldown;
