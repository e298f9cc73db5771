//! In-process backend for tests. Replies arrive on a spawned thread, the way
//! LocalAuthentication replies on its own queue.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use super::{AuthBackend, AuthSession, ReplyHandler};
use crate::backend::types::{BiometryType, Reply};
use crate::options::EvaluateOptions;
use crate::outcome::DenialReason;
use crate::policy::Policy;

type Decider = Arc<dyn Fn(Policy, &str) -> Reply + Send + Sync>;

#[derive(Clone)]
pub enum Script {
    Reply(Reply),
    Decide(Decider),
    /// Never replies until invalidated, then reports `LAErrorAppCancel`.
    Hang,
    /// Drops the completion handler without calling it.
    DropReply,
    /// Refuses to submit the request.
    Refuse(String),
}

#[derive(Default)]
pub struct Stats {
    pub opened: AtomicUsize,
    pub released: AtomicUsize,
    pub invalidated: AtomicUsize,
    pub configured: Mutex<Vec<EvaluateOptions>>,
    pub evaluated: Mutex<Vec<(Policy, String)>>,
}

pub struct ScriptedBackend {
    script: Script,
    delay: Duration,
    capabilities: HashMap<Policy, Result<(), DenialReason>>,
    biometry: BiometryType,
    unavailable: Option<String>,
    stats: Arc<Stats>,
}

impl ScriptedBackend {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            delay: Duration::from_millis(5),
            capabilities: HashMap::new(),
            biometry: BiometryType::None,
            unavailable: None,
            stats: Arc::new(Stats::default()),
        }
    }

    pub fn replying(reply: Reply) -> Self {
        Self::new(Script::Reply(reply))
    }

    pub fn deciding<F>(decide: F) -> Self
    where
        F: Fn(Policy, &str) -> Reply + Send + Sync + 'static,
    {
        Self::new(Script::Decide(Arc::new(decide)))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_capability(mut self, policy: Policy, result: Result<(), DenialReason>) -> Self {
        self.capabilities.insert(policy, result);
        self
    }

    pub fn with_biometry(mut self, biometry: BiometryType) -> Self {
        self.biometry = biometry;
        self
    }

    pub fn unavailable(mut self, message: &str) -> Self {
        self.unavailable = Some(message.to_string());
        self
    }

    pub fn stats(&self) -> Arc<Stats> {
        self.stats.clone()
    }
}

impl AuthBackend for ScriptedBackend {
    fn id(&self) -> &str {
        "scripted"
    }

    fn open_session(&self) -> Result<Box<dyn AuthSession>, String> {
        if let Some(message) = &self.unavailable {
            return Err(message.clone());
        }
        self.stats.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedSession {
            script: self.script.clone(),
            delay: self.delay,
            capabilities: self.capabilities.clone(),
            biometry: self.biometry,
            queried: AtomicBool::new(false),
            pending: Mutex::new(None),
            stats: self.stats.clone(),
        }))
    }
}

struct ScriptedSession {
    script: Script,
    delay: Duration,
    capabilities: HashMap<Policy, Result<(), DenialReason>>,
    biometry: BiometryType,
    queried: AtomicBool,
    pending: Mutex<Option<ReplyHandler>>,
    stats: Arc<Stats>,
}

impl ScriptedSession {
    fn reply_later(&self, reply: ReplyHandler, value: Reply) {
        let delay = self.delay;
        thread::spawn(move || {
            thread::sleep(delay);
            reply(value);
        });
    }
}

impl AuthSession for ScriptedSession {
    fn can_evaluate(&self, policy: Policy) -> Result<(), DenialReason> {
        self.queried.store(true, Ordering::SeqCst);
        self.capabilities
            .get(&policy)
            .copied()
            .unwrap_or(Err(DenialReason::BiometryNotAvailable))
    }

    fn biometry_type(&self) -> BiometryType {
        if self.queried.load(Ordering::SeqCst) {
            self.biometry
        } else {
            BiometryType::None
        }
    }

    fn configure(&self, options: &EvaluateOptions) {
        self.stats.configured.lock().push(options.clone());
    }

    fn evaluate(&self, policy: Policy, reason: &str, reply: ReplyHandler) -> Result<(), String> {
        self.stats
            .evaluated
            .lock()
            .push((policy, reason.to_string()));
        match &self.script {
            Script::Reply(value) => self.reply_later(reply, value.clone()),
            Script::Decide(decide) => self.reply_later(reply, decide(policy, reason)),
            Script::Hang => *self.pending.lock() = Some(reply),
            Script::DropReply => drop(reply),
            Script::Refuse(message) => return Err(message.clone()),
        }
        Ok(())
    }

    fn invalidate(&self) {
        self.stats.invalidated.fetch_add(1, Ordering::SeqCst);
        if let Some(reply) = self.pending.lock().take() {
            self.reply_later(reply, Reply::failure(-9));
        }
    }
}

impl Drop for ScriptedSession {
    fn drop(&mut self) {
        self.stats.released.fetch_add(1, Ordering::SeqCst);
    }
}
