use crate::server::{
    data::guild_config::GuildConfigStore, error::config::ConfigError,
    model::guild_config::GuildConfig,
};

mod load;
mod save;
