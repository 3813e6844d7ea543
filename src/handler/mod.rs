//! Request handler module
//!
//! Route tables for the two fixture servers and the handlers behind them.
//! Every handler forwards its query parameter to a sink untouched.

pub mod command;
pub mod path;
pub mod router;

pub use router::handle_request;

/// Which route table a process serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixture {
    /// Shell command sinks
    Command,
    /// Filesystem path sinks
    Path,
}

impl Fixture {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Path => "path",
        }
    }

    /// Port used when `server.port` is not configured
    pub const fn default_port(self) -> u16 {
        match self {
            Self::Command => 5000,
            Self::Path => 5001,
        }
    }

    pub const fn routes(self) -> &'static [Route] {
        match self {
            Self::Command => &[
                Route::Ping,
                Route::Backup,
                Route::Convert,
                Route::Process,
                Route::List,
            ],
            Self::Path => &[Route::Download, Route::Read, Route::Static, Route::Serve],
        }
    }
}

/// A single GET endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Ping,
    Backup,
    Convert,
    Process,
    List,
    Download,
    Read,
    Static,
    Serve,
}

impl Route {
    /// Exact-match lookup by request path
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/ping" => Some(Self::Ping),
            "/backup" => Some(Self::Backup),
            "/convert" => Some(Self::Convert),
            "/process" => Some(Self::Process),
            "/list" => Some(Self::List),
            "/download" => Some(Self::Download),
            "/read" => Some(Self::Read),
            "/static" => Some(Self::Static),
            "/serve" => Some(Self::Serve),
            _ => None,
        }
    }

    pub const fn path(self) -> &'static str {
        match self {
            Self::Ping => "/ping",
            Self::Backup => "/backup",
            Self::Convert => "/convert",
            Self::Process => "/process",
            Self::List => "/list",
            Self::Download => "/download",
            Self::Read => "/read",
            Self::Static => "/static",
            Self::Serve => "/serve",
        }
    }

    /// Name of the query parameter the route reads
    pub const fn param(self) -> &'static str {
        match self {
            Self::Ping => "host",
            Self::Backup | Self::Process | Self::Download => "file",
            Self::Convert => "input",
            Self::List => "directory",
            Self::Read | Self::Serve => "path",
            Self::Static => "resource",
        }
    }

    pub const fn fixture(self) -> Fixture {
        match self {
            Self::Ping | Self::Backup | Self::Convert | Self::Process | Self::List => {
                Fixture::Command
            }
            Self::Download | Self::Read | Self::Static | Self::Serve => Fixture::Path,
        }
    }
}
