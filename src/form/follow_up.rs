//! Delayed work a successful submission leaves behind - navigating away, or closing the host that opened the form.
//!
//! Every follow-up hangs off the form's [`CancellationToken`], so tearing the form down means none of them fire late.

use std::{fmt::Debug, sync::Arc, time::Duration};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

///Moves the user to another view.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

///Callback the host passes so the form can close whatever it is shown in.
pub type OnClose = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub enum FollowUp {
    Navigate {
        navigator: Arc<dyn Navigator>,
        path: String,
    },
    Close(OnClose),
}

impl Debug for FollowUp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Navigate { path, .. } => f.debug_struct("Navigate").field("path", path).finish(),
            Self::Close(_) => f.write_str("Close"),
        }
    }
}

impl FollowUp {
    fn run(self) {
        match self {
            Self::Navigate { navigator, path } => {
                debug!(?path, "Navigating after booking");
                navigator.navigate(&path);
            }
            Self::Close(on_close) => {
                debug!("Closing booking form host");
                on_close();
            }
        }
    }
}

#[derive(Debug)]
pub struct FollowUps {
    delay: Duration,
    stop: CancellationToken,
}

impl FollowUps {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            stop: CancellationToken::new(),
        }
    }

    ///Runs `follow_up` once the delay has passed, unless [`FollowUps::cancel_all`] gets there first.
    pub fn schedule(&self, follow_up: FollowUp) {
        let stop = self.stop.child_token();
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::select! {
                () = stop.cancelled() => {
                    info!(?follow_up, "Follow-up cancelled before it ran");
                }
                () = sleep(delay) => follow_up.run(),
            }
        });
    }

    pub fn cancel_all(&self) {
        self.stop.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.stop.is_cancelled()
    }
}

impl Drop for FollowUps {
    fn drop(&mut self) {
        self.stop.cancel();
    }
}
