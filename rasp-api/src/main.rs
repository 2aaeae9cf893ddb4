use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use time::UtcOffset;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use rasp_sheet::{GroupRegistry, LoadPolicy, SchedulePaths, ScheduleService, ScheduleStore};

use crate::routes::{router, AppState};

mod routes;

#[derive(Parser)]
#[command(author, version, about, long_about)]
struct Args {
  #[arg(long, short, env = "RASP_LISTEN", default_value = "0.0.0.0:8000")]
  listen: SocketAddr,
  #[arg(long, env = "RASP_ODD_SCHEDULE", default_value = "rasp_cet.xlsx")]
  odd_schedule: PathBuf,
  #[arg(long, env = "RASP_EVEN_SCHEDULE", default_value = "rasp_necet.xlsx")]
  even_schedule: PathBuf,
  /// eager: read both workbooks at startup, lazy: read them on every request
  #[arg(long, env = "RASP_LOAD_POLICY", default_value = "eager")]
  load_policy: LoadPolicy,
  /// Group codes in workbook column order, replaces the built-in list
  #[arg(long, short, env = "RASP_GROUPS", value_delimiter = ',')]
  groups: Vec<String>,
  /// Hours east of UTC used to determine the current day
  #[arg(long, env = "RASP_UTC_OFFSET", default_value_t = 3, allow_negative_numbers = true)]
  utc_offset: i8,
  #[arg(long, env = "RASP_SENTRY_DSN")]
  sentry_dsn: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let args = Args::parse();

  let _sentry = args.sentry_dsn.as_deref().map(|dsn| {
    sentry::init((
      dsn,
      sentry::ClientOptions {
        release: sentry::release_name!(),
        ..Default::default()
      },
    ))
  });

  tracing_subscriber::registry()
    .with(tracing_subscriber::fmt::layer().with_filter(LevelFilter::INFO))
    .with(args.sentry_dsn.as_ref().map(|_| sentry_tracing::layer()))
    .init();

  let registry = if args.groups.is_empty() {
    GroupRegistry::default()
  } else {
    GroupRegistry::new(args.groups.iter().map(|group| group.trim()))
      .context("Invalid --groups list")?
  };
  info!("Serving {} groups", registry.len());

  let store = ScheduleStore::open(
    SchedulePaths::new(&args.odd_schedule, &args.even_schedule),
    args.load_policy,
  )
  .context("Unable to load schedules")?;

  let service = ScheduleService::new(registry, store);
  info!("Using {:?} schedule loading", service.store().policy());

  let state = AppState {
    service: Arc::new(service),
    utc_offset: UtcOffset::from_hms(args.utc_offset, 0, 0)?,
  };

  let listener = TcpListener::bind(args.listen).await?;
  info!("Listening on http://{}", listener.local_addr()?);

  axum::serve(listener, router(state))
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  info!("Shut down");
  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(err) = tokio::signal::ctrl_c().await {
      tracing::error!("Unable to listen for ctrl-c: {}", err);
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
      Ok(mut signal) => {
        signal.recv().await;
      }
      Err(err) => {
        tracing::error!("Unable to listen for SIGTERM: {}", err);
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }

  info!("Received shutdown signal");
}
