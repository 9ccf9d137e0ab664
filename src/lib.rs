//! # Document Task Manager
//!
//! Gini 文档处理 API 之上的高层异步任务封装
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 每个远程操作一个异步方法
//! - `ApiClient` - 远程能力 trait，编排层只依赖它
//! - `GiniApiClient` - 基于 reqwest 的 HTTP 实现
//!
//! ### ② 组合原语（Tasks）
//! - `tasks/` - `then` / `delay_then` / `for_each_sequential` / 取消
//!
//! ### ③ 流程层（Workflow）
//! - `DocumentPoller` - 轮询状态机（fetch → 判断终态 → 等待 → fetch）
//!
//! ### ④ 编排层（Orchestration）
//! - `DocumentTaskManager` - 每个用户场景一个异步操作
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod tasks;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{ApiClient, GiniApiClient};
pub use config::Config;
pub use error::{AppError, AppResult, RemoteError, RemoteErrorKind, UsageError};
pub use models::{
    Document, DocumentState, ErrorReport, Extraction, ExtractionMap, Layout, PreviewSize,
};
pub use orchestrator::DocumentTaskManager;
pub use tasks::CancelToken;
pub use workflow::{DocumentPoller, PollingInterval};
