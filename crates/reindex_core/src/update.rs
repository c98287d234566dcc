use crate::{AppState, Command, CommandKind, Effect, Msg, SnapshotSource};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::WorkersInputChanged(text) => {
            state.form_mut().workers_input = text;
            Vec::new()
        }
        Msg::JobSelected(job) => {
            state.form_mut().job = job.filter(|name| !name.trim().is_empty());
            Vec::new()
        }
        Msg::OverwriteSelected(mode) => {
            state.form_mut().overwrite = mode;
            Vec::new()
        }
        Msg::StartClicked => match state.start_request() {
            // Rejected locally without feedback; nothing is sent and the view
            // stays as it was.
            None => Vec::new(),
            Some(request) => {
                let request_id = state.allocate_request_id();
                vec![Effect::Send {
                    request_id,
                    command: Command::Start(request),
                }]
            }
        },
        Msg::AbortClicked => send(&mut state, Command::Abort),
        Msg::CleanClicked => send(&mut state, Command::Clean),
        Msg::RefreshRequested => send(&mut state, Command::Status),
        Msg::ResultsRequested(direction) => {
            let request_id = state.allocate_request_id();
            vec![Effect::FetchResults {
                request_id,
                direction,
            }]
        }
        Msg::SnapshotReceived { source, snapshot } => {
            let running = snapshot.running;
            state.apply_snapshot(snapshot);

            let mut effects = Vec::new();
            // A start response rarely carries progress yet; read it right away
            // instead of waiting for the next poll tick.
            if let SnapshotSource::Command {
                kind: CommandKind::Start,
                ..
            } = source
            {
                effects.extend(send(&mut state, Command::Status));
            }
            if running {
                effects.push(Effect::EnsurePolling);
            }
            effects
        }
        // No snapshot means no update; the next poll or command will catch up.
        Msg::TransportFailed { .. } => Vec::new(),
        Msg::ResultsReceived { page, .. } => {
            state.apply_results(page);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn send(state: &mut AppState, command: Command) -> Vec<Effect> {
    let request_id = state.allocate_request_id();
    vec![Effect::Send {
        request_id,
        command,
    }]
}
