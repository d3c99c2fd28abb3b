//! Channel based transport between inspector and a backend connection thread.

use crate::backend::{BackendCommand, Reply, Request, Transport};
use crate::error::Error;
use crate::fv_warn;
use crate::log::BACKEND;
use std::sync::mpsc::{channel, Receiver, SendError, Sender};

/// Inspector side of the exchange.
#[derive(Debug)]
pub struct ChannelTransport {
    requests: Sender<Request>,
}

impl Transport for ChannelTransport {
    fn submit(&self, request: Request) {
        if let Err(SendError(request)) = self.requests.send(request) {
            fv_warn!(target: BACKEND, "backend gone, request `{}` rejected", request.command());
            request.deliver(Err(Error::TransportClosed));
        }
    }
}

/// Backend side of the exchange.
#[derive(Debug)]
pub struct BackendExchanger {
    requests: Receiver<Request>,
}

impl BackendExchanger {
    /// Wait for the next request, `None` if all transports are dropped.
    pub fn next_request(&self) -> Option<Request> {
        self.requests.recv().ok()
    }

    /// Return next request if there is one.
    pub fn try_next_request(&self) -> Option<Request> {
        self.requests.try_recv().ok()
    }

    /// Answer requests with `handler` until all transports are dropped.
    /// Stale requests are skipped without calling the handler, handler errors
    /// are delivered as evaluation errors.
    pub fn serve(self, mut handler: impl FnMut(&BackendCommand) -> anyhow::Result<String>) {
        while let Some(request) = self.next_request() {
            if request.is_stale() {
                continue;
            }
            let reply: Reply =
                handler(request.command()).map_err(|e| Error::Evaluation(format!("{e:#}")));
            request.deliver(reply);
        }
    }
}

/// Create an exchange pair.
///
/// [`ChannelTransport`] is given to the inspector and sends requests.
/// [`BackendExchanger`] must be used at the backend connection side, it receives requests,
/// talks to the backend process and delivers replies.
pub fn exchange() -> (BackendExchanger, ChannelTransport) {
    let (req_tx, req_rx) = channel::<Request>();
    (
        BackendExchanger { requests: req_rx },
        ChannelTransport { requests: req_tx },
    )
}
