mod mail;

pub use mail::{
    HttpMailTransport, IMailTransport, InMemoryMailTransport, UnconfiguredMailTransport,
};
