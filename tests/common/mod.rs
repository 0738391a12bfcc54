#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use paper_picker::{
    MemoryStore, PaperClient, PaperTransport, Session, TransportError, TransportResponse,
};
use rust_xlsxwriter::Workbook;

pub const ENDPOINT: &str = "https://paper.test/exec";

/// 一次被记录的请求
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub url: String,
    pub body: String,
}

#[derive(Default)]
struct MockState {
    replies: VecDeque<Result<TransportResponse, TransportError>>,
    requests: Vec<SentRequest>,
}

/// 按顺序返回预设响应并记录所有请求
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, status: u16, body: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .replies
            .push_back(Ok(TransportResponse::new(status, body)));
        self
    }

    pub fn fail(&self, err: TransportError) -> &Self {
        self.state.lock().unwrap().replies.push_back(Err(err));
        self
    }

    pub fn requests(&self) -> Vec<SentRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

impl PaperTransport for MockTransport {
    fn post_text<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<TransportResponse, TransportError>> {
        let reply = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(SentRequest {
                url: url.to_string(),
                body,
            });
            state.replies.pop_front()
        };
        Box::pin(async move {
            reply.unwrap_or_else(|| Err(TransportError::Network("no reply queued".into())))
        })
    }
}

/// 共享同一个存储和传输的会话，用于模拟重新打开页面
pub fn session_with(store: &MemoryStore, transport: &MockTransport) -> Session {
    let client = PaperClient::new(ENDPOINT, Box::new(transport.clone()));
    Session::new(Box::new(store.clone()), client, true)
}

/// 生成只含字符串单元格的工作簿
pub fn workbook(rows: &[&[&str]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            if !cell.is_empty() {
                sheet.write_string(r as u32, c as u16, *cell).unwrap();
            }
        }
    }
    workbook.save_to_buffer().unwrap()
}

/// 含 `n` 道题目的工作簿，题型依次取自 `types`
pub fn question_file(types: &[&str]) -> Vec<u8> {
    let texts: Vec<String> = (1..=types.len()).map(|i| format!("Question {}", i)).collect();
    let mut rows: Vec<Vec<&str>> = vec![vec!["QuestionText", "QuestionType"]];
    for (text, kind) in texts.iter().zip(types) {
        rows.push(vec![text.as_str(), *kind]);
    }
    let borrowed: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
    workbook(&borrowed)
}
