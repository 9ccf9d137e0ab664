//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::DocumentTaskManager (每个用户场景一个操作)
//!     ↓
//! workflow::DocumentPoller (轮询状态机)
//!     ↓
//! tasks (组合原语：then / delay_then / for_each_sequential)
//!     ↓
//! clients::ApiClient (远程调用能力)
//! ```
//!
//! 本层只做串联，不解释远程返回的结果，也不做重试

pub mod document_task_manager;

pub use document_task_manager::DocumentTaskManager;
