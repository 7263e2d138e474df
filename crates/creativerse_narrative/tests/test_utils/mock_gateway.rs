//! Scripted generation gateway for testing.

use async_trait::async_trait;
use creativerse_core::{ChapterOption, IllustrationRef, RoundOptionSet, SymbolicRealization};
use creativerse_error::{CreativerseResult, GenerationError, GenerationErrorKind};
use creativerse_interface::{
    GenerationGateway, IllustrationRequest, PortraitRequest, RoundRequest, SymbolRequest,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Build an option set whose titles are `{prefix}1`, `{prefix}2`, ...
pub fn option_set(prefix: &str, count: usize) -> RoundOptionSet {
    (1..=count)
        .map(|i| {
            ChapterOption::new(
                format!("{prefix}{i}"),
                format!("Body of {prefix}{i}."),
                format!("img://{prefix}{i}"),
            )
        })
        .collect::<Vec<_>>()
        .into()
}

/// Mock gateway with scripted responses.
///
/// Rounds are served from a queue; once it runs dry each round gets a
/// generated set titled `R{round}-1`, `R{round}-2`, ... Every request is
/// recorded so tests can check what the controller asked for.
pub struct MockGateway {
    options_per_round: usize,
    rounds: Mutex<VecDeque<Result<RoundOptionSet, GenerationErrorKind>>>,
    illustrations: Mutex<VecDeque<Result<IllustrationRef, GenerationErrorKind>>>,
    failing_portraits: Mutex<HashSet<String>>,
    failing_symbols: AtomicBool,
    round_requests: Mutex<Vec<RoundRequest>>,
    illustration_requests: Mutex<Vec<IllustrationRequest>>,
    symbol_requests: Mutex<Vec<SymbolRequest>>,
    critiques: Mutex<Vec<(String, String)>>,
    portrait_calls: AtomicUsize,
    hold_rounds: AtomicBool,
    hold_illustrations: AtomicBool,
    round_release: Notify,
    illustration_release: Notify,
    character_gates: Mutex<HashMap<String, Arc<Notify>>>,
    realized: Mutex<Vec<String>>,
}

impl MockGateway {
    /// A gateway that always succeeds with `options_per_round` options.
    pub fn new(options_per_round: usize) -> Self {
        Self {
            options_per_round,
            rounds: Mutex::new(VecDeque::new()),
            illustrations: Mutex::new(VecDeque::new()),
            failing_portraits: Mutex::new(HashSet::new()),
            failing_symbols: AtomicBool::new(false),
            round_requests: Mutex::new(Vec::new()),
            illustration_requests: Mutex::new(Vec::new()),
            symbol_requests: Mutex::new(Vec::new()),
            critiques: Mutex::new(Vec::new()),
            portrait_calls: AtomicUsize::new(0),
            hold_rounds: AtomicBool::new(false),
            hold_illustrations: AtomicBool::new(false),
            round_release: Notify::new(),
            illustration_release: Notify::new(),
            character_gates: Mutex::new(HashMap::new()),
            realized: Mutex::new(Vec::new()),
        }
    }

    /// Queue the next round response.
    pub fn push_round(&self, set: RoundOptionSet) {
        self.rounds.lock().unwrap().push_back(Ok(set));
    }

    /// Queue a failing round.
    pub fn push_round_error(&self, kind: GenerationErrorKind) {
        self.rounds.lock().unwrap().push_back(Err(kind));
    }

    /// Queue the next illustration refresh response.
    pub fn push_illustration(&self, image: &str) {
        self.illustrations
            .lock()
            .unwrap()
            .push_back(Ok(IllustrationRef::new(image)));
    }

    /// Queue a failing illustration refresh.
    pub fn push_illustration_error(&self, kind: GenerationErrorKind) {
        self.illustrations.lock().unwrap().push_back(Err(kind));
    }

    /// Make portrait generation fail for characters with this description.
    pub fn fail_portrait_for(&self, description: &str) {
        self.failing_portraits
            .lock()
            .unwrap()
            .insert(description.to_string());
    }

    /// Make every symbol request fail.
    pub fn fail_symbols(&self) {
        self.failing_symbols.store(true, Ordering::SeqCst);
    }

    /// Park round requests until [`MockGateway::release_round`] is called.
    pub fn hold_rounds(&self) {
        self.hold_rounds.store(true, Ordering::SeqCst);
    }

    /// Let one parked round request through.
    pub fn release_round(&self) {
        self.round_release.notify_one();
    }

    /// Park illustration refreshes until released.
    pub fn hold_illustrations(&self) {
        self.hold_illustrations.store(true, Ordering::SeqCst);
    }

    /// Let one parked illustration refresh through.
    pub fn release_illustration(&self) {
        self.illustration_release.notify_one();
    }

    /// Park realization of the character with this description until released.
    pub fn hold_character(&self, description: &str) {
        self.character_gates
            .lock()
            .unwrap()
            .insert(description.to_string(), Arc::new(Notify::new()));
    }

    /// Let a parked character realization finish.
    pub fn release_character(&self, description: &str) {
        if let Some(gate) = self.character_gates.lock().unwrap().get(description) {
            gate.notify_one();
        }
    }

    /// Descriptions of realized characters, in completion order.
    pub fn realized(&self) -> Vec<String> {
        self.realized.lock().unwrap().clone()
    }

    async fn pass_character_gate(&self, description: &str) {
        let gate = self.character_gates.lock().unwrap().get(description).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    fn mark_realized(&self, description: &str) {
        self.realized.lock().unwrap().push(description.to_string());
    }

    /// Round requests received so far.
    pub fn round_requests(&self) -> Vec<RoundRequest> {
        self.round_requests.lock().unwrap().clone()
    }

    /// Illustration requests received so far.
    pub fn illustration_requests(&self) -> Vec<IllustrationRequest> {
        self.illustration_requests.lock().unwrap().clone()
    }

    /// Symbol requests received so far.
    pub fn symbol_requests(&self) -> Vec<SymbolRequest> {
        self.symbol_requests.lock().unwrap().clone()
    }

    /// Critique inputs received so far.
    pub fn critiques(&self) -> Vec<(String, String)> {
        self.critiques.lock().unwrap().clone()
    }

    /// Number of portrait requests.
    pub fn portrait_calls(&self) -> usize {
        self.portrait_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationGateway for MockGateway {
    async fn generate_round(&self, req: &RoundRequest) -> CreativerseResult<RoundOptionSet> {
        self.round_requests.lock().unwrap().push(req.clone());
        if self.hold_rounds.load(Ordering::SeqCst) {
            self.round_release.notified().await;
        }

        let scripted = self.rounds.lock().unwrap().pop_front();
        match scripted {
            Some(Ok(set)) => Ok(set),
            Some(Err(kind)) => Err(GenerationError::new(kind).into()),
            None => Ok(option_set(
                &format!("R{}-", req.round()),
                self.options_per_round,
            )),
        }
    }

    async fn regenerate_illustration(
        &self,
        req: &IllustrationRequest,
    ) -> CreativerseResult<IllustrationRef> {
        self.illustration_requests.lock().unwrap().push(req.clone());
        if self.hold_illustrations.load(Ordering::SeqCst) {
            self.illustration_release.notified().await;
        }

        let scripted = self.illustrations.lock().unwrap().pop_front();
        match scripted {
            Some(Ok(image)) => Ok(image),
            Some(Err(kind)) => Err(GenerationError::new(kind).into()),
            None => Ok(IllustrationRef::new(format!("img://redrawn/{}", req.title()))),
        }
    }

    async fn critique(&self, original: &str, edited: &str) -> CreativerseResult<String> {
        self.critiques
            .lock()
            .unwrap()
            .push((original.to_string(), edited.to_string()));
        Ok(format!("Nice change to \"{}\"!", edited))
    }

    async fn realize_portrait(&self, req: &PortraitRequest) -> CreativerseResult<IllustrationRef> {
        self.portrait_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_character_gate(req.description()).await;
        if self.failing_portraits.lock().unwrap().contains(req.description()) {
            return Err(GenerationError::new(GenerationErrorKind::ContentRejected(
                "portrait refused".to_string(),
            ))
            .into());
        }
        self.mark_realized(req.description());
        Ok(IllustrationRef::new(format!(
            "img://portrait/{}",
            req.description()
        )))
    }

    async fn realize_symbol(&self, req: &SymbolRequest) -> CreativerseResult<SymbolicRealization> {
        self.symbol_requests.lock().unwrap().push(req.clone());
        self.pass_character_gate(req.description()).await;
        if self.failing_symbols.load(Ordering::SeqCst) {
            return Err(GenerationError::new(GenerationErrorKind::Network(
                "symbol service down".to_string(),
            ))
            .into());
        }
        self.mark_realized(req.description());
        Ok(SymbolicRealization {
            concept: format!("{} drawn from {}", req.name(), req.theme()),
            illustration: IllustrationRef::new(format!("img://symbol/{}", req.name())),
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
