use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // Load .env first so RUST_LOG and REST_SERVER_URL take effect.
    dotenv().ok();
    common::utils::logging::init_logging_default();
}

fn main() -> std::process::ExitCode {
    init_logging();

    let session_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new({
        let session_id = session_id;
        move |info| {
            error!(
                service = "admin",
                event = "panic",
                %session_id,
                pid,
                message = %info,
                "unhandled panic occurred"
            );
        }
    }));

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(
                service = "admin",
                event = "runtime_build_failed",
                error = %e,
                "failed to build tokio runtime"
            );
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "admin",
        event = "start",
        %session_id,
        pid,
        version,
        "admin console starting"
    );

    match rt.block_on(admin::run()) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(
                service = "admin",
                event = "command_failed",
                %session_id,
                pid,
                error = %e,
                "admin command failed"
            );
            eprintln!("error: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}
