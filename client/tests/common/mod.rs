#![allow(dead_code)]

//! Scripted gateway and confirmer for controller tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use error_types::{ClientError, Result};
use fitlife_client::state::Confirmer;
use fitlife_client::{ApiBody, FormPayload, Gateway};

#[derive(Debug, Clone)]
pub struct CallRecord {
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
}

/// Gateway that replays queued responses in order and records every call.
#[derive(Default)]
pub struct MockGateway {
    script: Mutex<VecDeque<std::result::Result<ApiBody, ClientError>>>,
    calls: Mutex<Vec<CallRecord>>,
    forms: Mutex<Vec<FormPayload>>,
}

impl MockGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn enqueue_json(&self, value: Value) {
        self.script.lock().unwrap().push_back(Ok(ApiBody::Json(value)));
    }

    pub fn enqueue_empty(&self) {
        self.script.lock().unwrap().push_back(Ok(ApiBody::Empty));
    }

    pub fn enqueue_error(&self, err: ClientError) {
        self.script.lock().unwrap().push_back(Err(err));
    }

    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.path == path)
            .count()
    }

    pub fn last_form(&self) -> Option<FormPayload> {
        self.forms.lock().unwrap().last().cloned()
    }

    fn next(&self) -> Result<ApiBody> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("gateway received a request with no scripted response")
    }

    fn record(&self, method: &Method, path: &str, body: Option<Value>) {
        self.calls.lock().unwrap().push(CallRecord {
            method: method.to_string(),
            path: path.to_string(),
            body,
        });
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<ApiBody> {
        self.record(&method, path, body);
        self.next()
    }

    async fn send_form(&self, method: Method, path: &str, form: FormPayload) -> Result<ApiBody> {
        self.record(&method, path, None);
        self.forms.lock().unwrap().push(form);
        self.next()
    }
}

/// Confirmer with a fixed answer that records every prompt.
pub struct ScriptedConfirmer {
    accept: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirmer {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self {
            accept: true,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn declining() -> Arc<Self> {
        Arc::new(Self {
            accept: false,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.accept
    }
}
