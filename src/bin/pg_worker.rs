//! Runs embedded `PostgreSQL` lifecycle steps for the integration test
//! cluster.
//!
//! ```text
//! pg_worker <setup|start|stop> <payload.json>
//! ```
//!
//! The payload is a serialized `WorkerPayload` carrying `postgresql_embedded`
//! settings and environment overrides. `PostgreSQL` refuses to run as the
//! superuser, so a worker launched as root switches to `nobody` before it
//! touches the cluster.

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[cfg(unix)]
fn main() -> Result<(), BoxError> {
    unix_worker::run(std::env::args_os()).map_err(Into::into)
}

#[cfg(not(unix))]
fn main() -> Result<(), BoxError> {
    Err("pg_worker is only supported on Unix platforms".into())
}

#[cfg(unix)]
mod unix_worker {
    use std::ffi::{CString, OsString};
    use std::fmt;
    use std::io::Read;

    use camino::{Utf8Path, Utf8PathBuf};
    use nix::unistd::{Uid, User, initgroups, setgid, setuid};
    use pg_embedded_setup_unpriv::ambient_dir_and_path;
    use pg_embedded_setup_unpriv::worker::{PlainSecret, WorkerPayload};
    use postgresql_embedded::{PostgreSQL, Status};
    use thiserror::Error;

    const UNPRIVILEGED_USER: &str = "nobody";

    /// Lifecycle step requested by the harness.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Operation {
        Setup,
        Start,
        Stop,
    }

    impl Operation {
        pub fn parse(value: &str) -> Result<Self, WorkerError> {
            match value {
                "setup" => Ok(Self::Setup),
                "start" => Ok(Self::Start),
                "stop" => Ok(Self::Stop),
                other => Err(WorkerError::Usage(format!("unknown operation '{other}'"))),
            }
        }

        const fn as_str(self) -> &'static str {
            match self {
                Self::Setup => "setup",
                Self::Start => "start",
                Self::Stop => "stop",
            }
        }
    }

    impl fmt::Display for Operation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    #[derive(Debug, Error)]
    pub enum WorkerError {
        #[error("usage: pg_worker <setup|start|stop> <payload.json>: {0}")]
        Usage(String),
        #[error("failed to read payload {path}: {message}")]
        PayloadRead { path: Utf8PathBuf, message: String },
        #[error("failed to parse payload: {0}")]
        PayloadParse(#[from] serde_json::Error),
        #[error("invalid postgres settings: {0}")]
        Settings(String),
        #[error("failed to switch to user {user}: {message}")]
        PrivilegeDrop { user: &'static str, message: String },
        #[error("failed to build runtime: {0}")]
        Runtime(#[source] std::io::Error),
        #[error("postgres {operation} failed: {message}")]
        Postgres { operation: Operation, message: String },
    }

    pub fn run(args: impl IntoIterator<Item = OsString>) -> Result<(), WorkerError> {
        let (operation, payload_path) = parse_args(args)?;
        let payload = load_payload(&payload_path)?;
        drop_privileges(UNPRIVILEGED_USER)?;
        let settings = payload
            .settings
            .into_settings()
            .map_err(|err| WorkerError::Settings(err.to_string()))?;
        apply_environment(&payload.environment);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(WorkerError::Runtime)?;
        runtime.block_on(execute(operation, PostgreSQL::new(settings)))
    }

    pub fn parse_args(
        args: impl IntoIterator<Item = OsString>,
    ) -> Result<(Operation, Utf8PathBuf), WorkerError> {
        let values = args
            .into_iter()
            .skip(1)
            .map(|arg| {
                arg.into_string()
                    .map_err(|_| WorkerError::Usage("arguments must be valid UTF-8".to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        match values.as_slice() {
            [operation, path] => Ok((Operation::parse(operation)?, Utf8PathBuf::from(path.as_str()))),
            [] => Err(WorkerError::Usage("missing operation".to_owned())),
            [_] => Err(WorkerError::Usage("missing payload path".to_owned())),
            [_, _, extra, ..] => Err(WorkerError::Usage(format!("unexpected argument '{extra}'"))),
        }
    }

    fn load_payload(path: &Utf8Path) -> Result<WorkerPayload, WorkerError> {
        let unreadable = |message: String| WorkerError::PayloadRead {
            path: path.to_owned(),
            message,
        };
        let (dir, relative) = ambient_dir_and_path(path).map_err(|err| unreadable(err.to_string()))?;
        let mut file = dir
            .open(relative.as_std_path())
            .map_err(|err| unreadable(err.to_string()))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|err| unreadable(err.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn drop_privileges(username: &'static str) -> Result<(), WorkerError> {
        if !Uid::effective().is_root() {
            return Ok(());
        }

        let refused = |message: String| WorkerError::PrivilegeDrop {
            user: username,
            message,
        };
        let user = User::from_name(username)
            .map_err(|err| refused(err.to_string()))?
            .ok_or_else(|| refused("no such user".to_owned()))?;
        let name = CString::new(user.name.as_str()).map_err(|err| refused(err.to_string()))?;
        initgroups(&name, user.gid).map_err(|err| refused(err.to_string()))?;
        setgid(user.gid).map_err(|err| refused(err.to_string()))?;
        setuid(user.uid).map_err(|err| refused(err.to_string()))?;
        // initdb must be able to resolve its working directory as the new user.
        std::env::set_current_dir("/").map_err(|err| refused(err.to_string()))?;

        // SAFETY: the worker is still single-threaded; the runtime is built later.
        unsafe {
            std::env::set_var("HOME", &user.dir);
            std::env::set_var("USER", &user.name);
            std::env::set_var("LOGNAME", &user.name);
        }
        Ok(())
    }

    fn apply_environment(environment: &[(String, Option<PlainSecret>)]) {
        for (key, value) in environment {
            // SAFETY: the worker is still single-threaded; the runtime is built later.
            unsafe {
                match value {
                    Some(plain) => std::env::set_var(key, plain.expose()),
                    None => std::env::remove_var(key),
                }
            }
        }
    }

    async fn execute(operation: Operation, mut postgres: PostgreSQL) -> Result<(), WorkerError> {
        let failed = |err: postgresql_embedded::Error| WorkerError::Postgres {
            operation,
            message: err.to_string(),
        };

        match operation {
            Operation::Setup => {
                postgres.setup().await.map_err(failed)?;
                start_if_stopped(&mut postgres).await.map_err(failed)?;
            }
            Operation::Start => start_if_stopped(&mut postgres).await.map_err(failed)?,
            Operation::Stop => return postgres.stop().await.map_err(failed),
        }

        // Dropping the handle would stop the server the harness just asked for.
        let _running = std::mem::ManuallyDrop::new(postgres);
        Ok(())
    }

    async fn start_if_stopped(postgres: &mut PostgreSQL) -> Result<(), postgresql_embedded::Error> {
        if matches!(postgres.status(), Status::Started) {
            return Ok(());
        }
        postgres.start().await
    }

}
