use tokio::sync::{watch, Mutex};
use tracing::{info, warn};

use ic_core::clip::{classify_input_with_length, ClipInput};
use ic_core::workflow::{ClipFailure, ClipFlowEvent, ClipOutcome, WorkflowState};

use super::{CreateClip, LookupClip};
use crate::deps::{ClipDeps, ClipSettings};
use crate::tracker::FlowTracker;

/// Entry point for a single text box that accepts a URL or a clip code.
///
/// At most one submission runs at a time. A second submission made while one
/// is in flight is refused with [`ClipFailure::Busy`] and leaves the running
/// one untouched.
///
/// 单入口：输入短码则查询，输入 URL 则创建。
pub struct ClipWorkflow {
    create: CreateClip,
    lookup: LookupClip,
    code_length: usize,
    tracker: Mutex<FlowTracker>,
    state_rx: watch::Receiver<WorkflowState>,
}

impl ClipWorkflow {
    pub fn new(deps: ClipDeps, settings: ClipSettings) -> Self {
        let (sender, state_rx) = watch::channel(WorkflowState::Idle);
        Self {
            create: CreateClip::from_deps(&deps, settings),
            lookup: LookupClip::from_deps(&deps),
            code_length: settings.code_length,
            tracker: Mutex::new(FlowTracker::new(sender)),
            state_rx,
        }
    }

    /// Watch every state change, including progress steps.
    pub fn subscribe(&self) -> watch::Receiver<WorkflowState> {
        self.state_rx.clone()
    }

    pub fn state(&self) -> WorkflowState {
        self.state_rx.borrow().clone()
    }

    #[tracing::instrument(name = "usecase.clip_workflow.submit", skip(self, input))]
    pub async fn submit(&self, input: &str) -> ClipOutcome {
        let Ok(mut tracker) = self.tracker.try_lock() else {
            warn!("Submission refused while another is in progress");
            return ClipOutcome::Failure(ClipFailure::Busy);
        };

        tracker.apply(ClipFlowEvent::Submit {
            input: input.to_string(),
        });
        let classified = classify_input_with_length(input, self.code_length);
        tracker.apply(ClipFlowEvent::Classified(classified.clone()));

        match classified {
            ClipInput::Code(code) => self.lookup.execute(&code, &mut tracker).await,
            ClipInput::Url(url) => self.create.execute(&url, &mut tracker).await,
            ClipInput::Invalid => {
                info!("Input is neither a clip code nor a URL");
                ClipOutcome::Failure(ClipFailure::InvalidInput)
            }
        }
    }

    /// Clear the last result. Returns `false` while a submission is running.
    pub fn reset(&self) -> bool {
        match self.tracker.try_lock() {
            Ok(mut tracker) => {
                tracker.apply(ClipFlowEvent::Reset);
                true
            }
            Err(_) => false,
        }
    }
}
