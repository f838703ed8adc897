//! Clip workflow state machine.
//!
//! Defines a pure state transition function for one submission:
//!
//! ```text
//! Idle -> ValidatingInput -> CreatingClip  -> Done | Failed
//!                         -> LookingUpClip -> Done | Failed
//! ```
//!
//! `Done` and `Failed` are resting states like `Idle`: they hold the last
//! result and accept the next submission.
//!
//! 纯状态机：不包含副作用。

use serde::{Deserialize, Serialize};

use super::outcome::{ClipFailure, ClipSuccess};
use crate::clip::{ClipCode, ClipInput};
use crate::ids::{ContentId, TxHandle};

/// Workflow state.
///
/// 工作流状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowState {
    /// Waiting for input.
    ///
    /// 等待输入。
    Idle,
    /// Routing raw input.
    ///
    /// 校验输入。
    ValidatingInput { input: String },
    /// Creating a clip for `url`.
    ///
    /// 创建短码。
    CreatingClip { url: String, step: CreateStep },
    /// Resolving `code`.
    ///
    /// 查询短码。
    LookingUpClip { code: ClipCode, step: LookupStep },
    /// Finished with a result.
    ///
    /// 成功完成。
    Done(ClipSuccess),
    /// Finished with a failure.
    ///
    /// 失败。
    Failed(ClipFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreateStep {
    DerivingCode,
    UploadingBlob {
        code: ClipCode,
    },
    ExecutingContract {
        code: ClipCode,
        cid: ContentId,
    },
    AwaitingConfirmation {
        code: ClipCode,
        cid: ContentId,
        tx: TxHandle,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupStep {
    QueryingRegistry,
    FetchingBlob { cid: ContentId },
}

/// Events that drive the workflow.
///
/// 驱动工作流的事件。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipFlowEvent {
    /// User submits raw text.
    Submit { input: String },
    /// Input was routed.
    Classified(ClipInput),
    CodeDerived { code: ClipCode },
    BlobUploaded { cid: ContentId },
    TransactionSubmitted { tx: TxHandle },
    Confirmed,
    /// Signer declined the registry write.
    SignatureDenied,
    PointerResolved { cid: ContentId },
    BlobFetched { url: String },
    Fail(ClipFailure),
    /// Clear the last result.
    Reset,
}

impl WorkflowState {
    /// Whether a new submission may start from this state.
    pub fn is_resting(&self) -> bool {
        matches!(
            self,
            WorkflowState::Idle | WorkflowState::Done(_) | WorkflowState::Failed(_)
        )
    }

    /// Progress text for the current step; `None` when resting.
    pub fn status_text(&self) -> Option<&'static str> {
        match self {
            WorkflowState::ValidatingInput { .. } => Some("Validating input"),
            WorkflowState::CreatingClip { step, .. } => Some(match step {
                CreateStep::DerivingCode | CreateStep::UploadingBlob { .. } => "Uploading to IPFS",
                CreateStep::ExecutingContract { .. } => "Executing contract",
                CreateStep::AwaitingConfirmation { .. } => "Adding clip onto the blockchain",
            }),
            WorkflowState::LookingUpClip { step, .. } => Some(match step {
                LookupStep::QueryingRegistry => "Looking up clip",
                LookupStep::FetchingBlob { .. } => "Fetching clip from IPFS",
            }),
            WorkflowState::Idle | WorkflowState::Done(_) | WorkflowState::Failed(_) => None,
        }
    }
}

/// Pure clip workflow state machine.
pub struct ClipFlowStateMachine;

impl ClipFlowStateMachine {
    pub fn transition(state: WorkflowState, event: ClipFlowEvent) -> WorkflowState {
        match (state, event) {
            (state, ClipFlowEvent::Submit { input }) if state.is_resting() => {
                WorkflowState::ValidatingInput { input }
            }
            (state, ClipFlowEvent::Reset) if state.is_resting() => WorkflowState::Idle,

            (WorkflowState::ValidatingInput { .. }, ClipFlowEvent::Classified(input)) => {
                match input {
                    ClipInput::Code(code) => WorkflowState::LookingUpClip {
                        code,
                        step: LookupStep::QueryingRegistry,
                    },
                    ClipInput::Url(url) => WorkflowState::CreatingClip {
                        url,
                        step: CreateStep::DerivingCode,
                    },
                    ClipInput::Invalid => WorkflowState::Failed(ClipFailure::InvalidInput),
                }
            }

            (
                WorkflowState::CreatingClip {
                    url,
                    step: CreateStep::DerivingCode,
                },
                ClipFlowEvent::CodeDerived { code },
            ) => WorkflowState::CreatingClip {
                url,
                step: CreateStep::UploadingBlob { code },
            },
            (
                WorkflowState::CreatingClip {
                    url,
                    step: CreateStep::UploadingBlob { code },
                },
                ClipFlowEvent::BlobUploaded { cid },
            ) => WorkflowState::CreatingClip {
                url,
                step: CreateStep::ExecutingContract { code, cid },
            },
            (
                WorkflowState::CreatingClip {
                    url,
                    step: CreateStep::ExecutingContract { code, cid },
                },
                ClipFlowEvent::TransactionSubmitted { tx },
            ) => WorkflowState::CreatingClip {
                url,
                step: CreateStep::AwaitingConfirmation { code, cid, tx },
            },
            (
                WorkflowState::CreatingClip {
                    step: CreateStep::ExecutingContract { .. },
                    ..
                },
                ClipFlowEvent::SignatureDenied,
            ) => WorkflowState::Idle,
            (
                WorkflowState::CreatingClip {
                    step: CreateStep::AwaitingConfirmation { code, cid, .. },
                    ..
                },
                ClipFlowEvent::Confirmed,
            ) => WorkflowState::Done(ClipSuccess::Created { code, cid }),

            (
                WorkflowState::LookingUpClip {
                    code,
                    step: LookupStep::QueryingRegistry,
                },
                ClipFlowEvent::PointerResolved { cid },
            ) => WorkflowState::LookingUpClip {
                code,
                step: LookupStep::FetchingBlob { cid },
            },
            (
                WorkflowState::LookingUpClip {
                    code,
                    step: LookupStep::FetchingBlob { .. },
                },
                ClipFlowEvent::BlobFetched { url },
            ) => WorkflowState::Done(ClipSuccess::Resolved { code, url }),

            (state, ClipFlowEvent::Fail(failure)) if !state.is_resting() => {
                WorkflowState::Failed(failure)
            }

            (state, _event) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(state = ?state, event = ?_event, "ignoring clip flow event");
                state
            }
        }
    }
}
