use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use log::LevelFilter;
use reindex_client::{ClientHandle, HttpJobController, HttpSearchPager, JobController, SearchPager};
use reindex_core::{update, AppState, Effect, HistoryChange, Msg};
use reindex_logging::{reindex_debug, reindex_info, reindex_warn};

use super::cli::{Cli, Commands};
use super::config::{self, ConfigOrigin, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::ui;

const EVENT_WAIT: Duration = Duration::from_millis(200);

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

    if let Commands::InitConfig { force } = cli.command {
        config::write_default(&config_path, force)?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    let (mut config, origin) = config::load(&config_path);
    if let Some(url) = &cli.url {
        config.controller_url = url.clone();
    }
    if let Some(interval) = cli.interval {
        config.poll_interval_secs = interval;
    }

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    reindex_logging::initialize(&config.log_destination(), level);
    match &origin {
        ConfigOrigin::File(path) => reindex_info!("Loaded config from {}", path.display()),
        ConfigOrigin::Defaults(path) => {
            reindex_debug!("No config at {}, using defaults", path.display())
        }
        ConfigOrigin::Fallback(err) => reindex_warn!("{}; using defaults", err),
    }

    let controller: Arc<dyn JobController> = Arc::new(
        HttpJobController::new(config.controller_settings())
            .context("could not set up the controller client")?,
    );
    let pager: Option<Arc<dyn SearchPager>> = match config.search_settings() {
        Some((url, http)) => {
            let pager =
                HttpSearchPager::new(url, &http).context("could not set up the search client")?;
            Some(Arc::new(pager))
        }
        None => None,
    };
    if matches!(cli.command, Commands::Results { .. }) && pager.is_none() {
        bail!("no search_url configured in {}", config_path.display());
    }

    let client = ClientHandle::new(controller, pager, config.poll_settings())
        .context("could not start the client runtime")?;
    let mut session = Session {
        state: AppState::with_config(config.update_config()),
        runner: EffectRunner::new(client, cli.command.watch()),
    };

    for msg in initial_msgs(cli.command) {
        session.dispatch(msg);
    }
    session.run_until_settled();

    let failed = session.runner.failed_commands();
    if failed > 0 {
        bail!("{failed} request(s) failed, see log for details");
    }
    Ok(())
}

/// Translates a subcommand into the messages a user would have produced.
fn initial_msgs(command: Commands) -> Vec<Msg> {
    match command {
        Commands::Status { .. } => vec![Msg::RefreshRequested],
        Commands::Start {
            workers,
            job,
            overwrite,
            ..
        } => vec![
            Msg::WorkersInputChanged(workers),
            Msg::JobSelected(job),
            Msg::OverwriteSelected(overwrite.map(Into::into)),
            Msg::StartClicked,
        ],
        Commands::Abort => vec![Msg::AbortClicked],
        Commands::Clean => vec![Msg::CleanClicked],
        Commands::Results { direction } => vec![Msg::ResultsRequested(direction.into())],
        Commands::InitConfig { .. } => Vec::new(),
    }
}

struct Session {
    state: AppState,
    runner: EffectRunner,
}

impl Session {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        if self.state.consume_dirty() {
            self.present();
        }
        self.runner.enqueue(effects);
    }

    fn run_until_settled(&mut self) {
        while !self.runner.is_settled() {
            let Some(msg) = self.runner.next_msg(EVENT_WAIT) else {
                continue;
            };
            self.dispatch(msg);

            // A stale stop notice can race a restart; keep watching while the
            // last known state is still running.
            if self.runner.is_settled() {
                let running = self
                    .state
                    .latest_snapshot()
                    .is_some_and(|snapshot| snapshot.running);
                if running {
                    self.runner.enqueue(vec![Effect::EnsurePolling]);
                }
            }
        }
    }

    fn present(&self) {
        let view = self.state.view();

        if view.last_history_change == Some(HistoryChange::Regressed) {
            reindex_warn!("History lost entries during a run; showing the latest snapshot");
        }
        if let Some(snapshot) = self.state.latest_snapshot() {
            let consistent = snapshot
                .progress
                .as_ref()
                .map_or(true, |progress| progress.is_consistent(snapshot.running));
            if !consistent {
                reindex_warn!("Progress counters are inconsistent: {:?}", snapshot.progress);
            }
        }

        let stamp = self
            .state
            .latest_snapshot()
            .map(|_| chrono::Local::now().format("%H:%M:%S").to_string());
        for line in ui::render::render(&view, stamp.as_deref()) {
            println!("{line}");
        }
    }
}
