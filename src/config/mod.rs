mod settings;

pub use settings::{
    ClassifierConfig, ClosetConfig, EmbedderConfig, HubConfig, Settings, StylistConfig,
};
