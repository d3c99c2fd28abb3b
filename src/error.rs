#[derive(Debug, thiserror::Error)]
pub enum Error {
    // --------------------------------- backend errors --------------------------------------------
    #[error("{0}")]
    Evaluation(String),
    #[error("backend transport closed")]
    TransportClosed,

    // --------------------------------- protocol errors -------------------------------------------
    #[error("unrecognized reply line: {0}")]
    MalformedLine(String),

    // --------------------------------- configuration errors --------------------------------------
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    IO(#[from] std::io::Error),
}

impl Error {
    /// Return a hint to a caller - keep the inspection session alive after error or drop it.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Evaluation(_) => false,
            Error::MalformedLine(_) => false,
            Error::Config(_) => false,
            Error::IO(_) => false,

            // no backend to talk to anymore
            Error::TransportClosed => true,
        }
    }
}

#[macro_export]
macro_rules! _error {
    ($log_fn: path, $res: expr) => {
        match $res {
            Ok(value) => Some(value),
            Err(e) => {
                $log_fn!(target: $crate::log::INSPECTOR, "{:#}", e);
                None
            }
        }
    };
    ($log_fn: path, $res: expr, $msg: tt) => {
        match $res {
            Ok(value) => Some(value),
            Err(e) => {
                $log_fn!(target: $crate::log::INSPECTOR, concat!($msg, " {:#}"), e);
                None
            }
        }
    };
}

/// Transforms `Result` into `Option` and logs an error if it occurs.
#[macro_export]
macro_rules! weak_error {
    ($res: expr) => {
        $crate::_error!($crate::fv_warn, $res)
    };
    ($res: expr, $msg: tt) => {
        $crate::_error!($crate::fv_warn, $res, $msg)
    };
}

/// Transforms `Result` into `Option` and put error into debug logs if it occurs.
#[macro_export]
macro_rules! muted_error {
    ($res: expr) => {
        $crate::_error!($crate::fv_debug, $res)
    };
    ($res: expr, $msg: tt) => {
        $crate::_error!($crate::fv_debug, $res, $msg)
    };
}
