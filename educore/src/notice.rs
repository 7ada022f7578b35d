use serde::{Deserialize, Serialize};

/// User-visible notifications raised by a browser.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Notice {
    CouldNotLoad,
    LoginRequired,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::CouldNotLoad => "Impossible de charger les données.",
            Notice::LoginRequired => "Veuillez vous connecter pour accéder à cette page.",
        }
    }
}

/// The toast/alert collaborator.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Reports notices through the logger only.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        log::warn!("{}", notice.message());
    }
}
