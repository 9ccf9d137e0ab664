//! 测试用的内存版 ApiClient
//!
//! - 按脚本或按时间切换文档状态
//! - 记录每次 fetch_document 的时间点和调用方（`CALLER`）
//! - 可以让指定 extraction 的反馈提交失败
//! - 反馈会写回内存中的 extractions

#![allow(dead_code)]

use async_trait::async_trait;
use document_task_manager::{
    ApiClient, AppResult, Document, DocumentState, Extraction, ExtractionMap, Layout,
    PreviewSize, RemoteError, RemoteErrorKind,
};
use document_task_manager::models::PageLayout;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::time::Instant;

tokio::task_local! {
    /// 并发测试中用来区分是哪一条调用链发起的请求
    pub static CALLER: usize;
}

/// 文档状态的变化方式
enum StateSource {
    /// 每次 fetch 取下一个，最后一个保持不变
    Script(VecDeque<DocumentState>),
    /// 到达时间点之前为 Processing，之后为 Complete
    CompleteAt(Instant),
}

struct FakeDocument {
    document: Document,
    states: StateSource,
    extractions: ExtractionMap,
    incubator_extractions: ExtractionMap,
}

#[derive(Default)]
struct FakeState {
    documents: HashMap<String, FakeDocument>,
    fetch_calls: Vec<(Option<usize>, Instant)>,
    feedback_attempts: Vec<(String, String)>,
    preview_calls: Vec<(String, u32)>,
    fail_feedback_for: Option<String>,
    next_id: usize,
}

#[derive(Default)]
pub struct FakeApiClient {
    state: Mutex<FakeState>,
}

impl FakeApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加一个按脚本切换状态的文档
    pub fn add_document(&self, id: &str, states: &[DocumentState]) -> Document {
        let first = states.first().copied().unwrap_or(DocumentState::Complete);
        let mut document = Document::new(id, format!("{}.jpg", id), first);
        document.page_count = Some(2);
        self.insert(document.clone(), StateSource::Script(states.iter().copied().collect()));
        document
    }

    /// 添加一个在 `at` 之后才处理完成的文档
    pub fn add_document_completing_at(&self, id: &str, at: Instant) -> Document {
        let document = Document::new(id, format!("{}.jpg", id), DocumentState::Processing);
        self.insert(document.clone(), StateSource::CompleteAt(at));
        document
    }

    fn insert(&self, document: Document, states: StateSource) {
        let mut state = self.state.lock().unwrap();
        state.documents.insert(
            document.id.clone(),
            FakeDocument {
                document,
                states,
                extractions: ExtractionMap::new(),
                incubator_extractions: ExtractionMap::new(),
            },
        );
    }

    pub fn set_extractions(&self, id: &str, extractions: &[Extraction]) {
        let mut state = self.state.lock().unwrap();
        let doc = state.documents.get_mut(id).unwrap();
        doc.extractions = to_map(extractions);
    }

    pub fn set_incubator_extractions(&self, id: &str, extractions: &[Extraction]) {
        let mut state = self.state.lock().unwrap();
        let doc = state.documents.get_mut(id).unwrap();
        doc.incubator_extractions = to_map(extractions);
    }

    pub fn fail_feedback_for(&self, name: &str) {
        self.state.lock().unwrap().fail_feedback_for = Some(name.to_string());
    }

    pub fn fetch_count(&self) -> usize {
        self.state.lock().unwrap().fetch_calls.len()
    }

    pub fn fetch_instants(&self) -> Vec<Instant> {
        let state = self.state.lock().unwrap();
        state.fetch_calls.iter().map(|(_, at)| *at).collect()
    }

    /// 某一条调用链（`CALLER.scope`）发起的 fetch 时间点
    pub fn fetch_instants_for(&self, caller: usize) -> Vec<Instant> {
        let state = self.state.lock().unwrap();
        state
            .fetch_calls
            .iter()
            .filter(|(tag, _)| *tag == Some(caller))
            .map(|(_, at)| *at)
            .collect()
    }

    pub fn feedback_attempts(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.feedback_attempts.iter().map(|(_, name)| name.clone()).collect()
    }

    pub fn preview_calls(&self) -> usize {
        self.state.lock().unwrap().preview_calls.len()
    }

    pub fn stored_value(&self, id: &str, name: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state
            .documents
            .get(id)
            .and_then(|doc| doc.extractions.get(name))
            .map(|e| e.value.clone())
    }
}

fn to_map(extractions: &[Extraction]) -> ExtractionMap {
    extractions
        .iter()
        .map(|e| (e.name.clone(), e.clone()))
        .collect()
}

fn not_found(id: &str) -> RemoteError {
    RemoteError::not_found(format!("/documents/{}", id))
}

#[async_trait]
impl ApiClient for FakeApiClient {
    async fn create_document(
        &self,
        filename: &str,
        _content: Vec<u8>,
        doc_type: Option<&str>,
    ) -> AppResult<Document> {
        let id = {
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            format!("created-{}", state.next_id)
        };
        let mut document = Document::new(&id, filename, DocumentState::Pending);
        document.doc_type = doc_type.map(str::to_string);
        self.insert(
            document.clone(),
            StateSource::Script(
                [
                    DocumentState::Pending,
                    DocumentState::Processing,
                    DocumentState::Complete,
                ]
                .into_iter()
                .collect(),
            ),
        );
        Ok(document)
    }

    async fn fetch_document(&self, document_id: &str) -> AppResult<Document> {
        let mut state = self.state.lock().unwrap();
        let now = Instant::now();
        state.fetch_calls.push((CALLER.try_with(|c| *c).ok(), now));

        let doc = state
            .documents
            .get_mut(document_id)
            .ok_or_else(|| not_found(document_id))?;
        let current = match &mut doc.states {
            StateSource::Script(states) if states.len() > 1 => states.pop_front().unwrap(),
            StateSource::Script(states) => states.front().copied().unwrap_or(doc.document.state),
            StateSource::CompleteAt(at) if now >= *at => DocumentState::Complete,
            StateSource::CompleteAt(_) => DocumentState::Processing,
        };

        let mut snapshot = doc.document.clone();
        snapshot.state = current;
        Ok(snapshot)
    }

    async fn fetch_extractions(&self, document_id: &str) -> AppResult<ExtractionMap> {
        let state = self.state.lock().unwrap();
        let doc = state
            .documents
            .get(document_id)
            .ok_or_else(|| not_found(document_id))?;
        Ok(doc.extractions.clone())
    }

    async fn fetch_incubator_extractions(&self, document_id: &str) -> AppResult<ExtractionMap> {
        let state = self.state.lock().unwrap();
        let doc = state
            .documents
            .get(document_id)
            .ok_or_else(|| not_found(document_id))?;
        let mut all = doc.extractions.clone();
        all.extend(doc.incubator_extractions.clone());
        Ok(all)
    }

    async fn submit_feedback(&self, document_id: &str, extraction: &Extraction) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .feedback_attempts
            .push((document_id.to_string(), extraction.name.clone()));

        if state.fail_feedback_for.as_deref() == Some(extraction.name.as_str()) {
            return Err(RemoteError::new(
                RemoteErrorKind::ServerError,
                format!("/documents/{}/extractions/{}", document_id, extraction.name),
                "HTTP 500",
            )
            .into());
        }

        let doc = state
            .documents
            .get_mut(document_id)
            .ok_or_else(|| not_found(document_id))?;
        doc.extractions
            .entry(extraction.name.clone())
            .and_modify(|stored| stored.value = extraction.value.clone())
            .or_insert_with(|| extraction.clone());
        Ok(())
    }

    async fn delete_document(&self, document_id: &str) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .documents
            .remove(document_id)
            .map(|_| ())
            .ok_or_else(|| not_found(document_id).into())
    }

    async fn fetch_preview(
        &self,
        document_id: &str,
        page: u32,
        size: PreviewSize,
    ) -> AppResult<Vec<u8>> {
        let mut state = self.state.lock().unwrap();
        state.preview_calls.push((document_id.to_string(), page));
        if !state.documents.contains_key(document_id) {
            return Err(not_found(document_id).into());
        }
        Ok(vec![page as u8; (size.max_width() / 250) as usize])
    }

    async fn fetch_layout(&self, document_id: &str) -> AppResult<Layout> {
        let state = self.state.lock().unwrap();
        let doc = state
            .documents
            .get(document_id)
            .ok_or_else(|| not_found(document_id))?;
        let pages = (1..=doc.document.page_count.unwrap_or(1))
            .map(|number| PageLayout {
                number,
                width: 595.0,
                height: 842.0,
                text_zones: Vec::new(),
            })
            .collect();
        Ok(Layout { pages })
    }

    async fn submit_error_report(
        &self,
        document_id: &str,
        _summary: Option<&str>,
        _description: Option<&str>,
    ) -> AppResult<String> {
        let state = self.state.lock().unwrap();
        if !state.documents.contains_key(document_id) {
            return Err(not_found(document_id).into());
        }
        Ok(format!("error-{}", document_id))
    }
}
