use crate::error::{GraphError, Result};
use crate::node::{EventSender, Node};
use crate::router::Router;
use packpal_llm::Message;
use packpal_persist::{Checkpoint, Checkpointer};
use packpal_types::{
    AssistantState, ChatMessage, GraphConfig, NodeType, PackingListAction, StateUpdate,
    StreamEvent, TripAction, TurnInput,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// At most one event is buffered ahead of the consumer
const EVENT_BUFFER: usize = 1;

/// Compiled decide/act graph. Cheap to clone; each turn owns its state.
#[derive(Clone)]
pub struct Graph {
    llm_node: Arc<dyn Node>,
    tool_node: Arc<dyn Node>,
    router: Arc<dyn Router>,
    checkpointer: Arc<dyn Checkpointer>,
    config: GraphConfig,
    system_prompt: Arc<str>,
}

impl Graph {
    pub(crate) fn from_parts(
        llm_node: Arc<dyn Node>,
        tool_node: Arc<dyn Node>,
        router: Arc<dyn Router>,
        checkpointer: Arc<dyn Checkpointer>,
        config: GraphConfig,
        system_prompt: Arc<str>,
    ) -> Self {
        Self {
            llm_node,
            tool_node,
            router,
            checkpointer,
            config,
            system_prompt,
        }
    }

    /// Create a builder for fluent construction
    pub fn builder() -> crate::builder::GraphBuilder {
        crate::builder::GraphBuilder::new()
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Run one user turn to completion, emitting snapshots and one terminal event
    pub async fn run_turn(&self, input: TurnInput, events: &EventSender) -> Result<AssistantState> {
        let started = Instant::now();
        let thread_id = input.thread_id.clone();
        tracing::info!("GRAPH: turn started thread={}", thread_id);

        let outcome = self.execute_turn(input, events).await;
        self.finish(&thread_id, outcome, started, events).await
    }

    /// Continue an unfinished turn from its last checkpoint
    pub async fn resume(&self, thread_id: &str, events: &EventSender) -> Result<AssistantState> {
        let started = Instant::now();
        tracing::info!("GRAPH: resume requested thread={}", thread_id);

        let outcome = self.execute_resume(thread_id, events).await;
        self.finish(thread_id, outcome, started, events).await
    }

    /// Spawn a turn in background, return event receiver
    pub fn spawn_run(&self, input: TurnInput) -> mpsc::Receiver<StreamEvent> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let graph = self.clone();

        tokio::spawn(async move {
            if let Err(e) = graph.run_turn(input, &tx).await {
                tracing::debug!("GRAPH: spawned turn ended with {}", e.kind());
            }
        });

        rx
    }

    pub fn stream(&self, input: TurnInput) -> ReceiverStream<StreamEvent> {
        ReceiverStream::new(self.spawn_run(input))
    }

    pub fn spawn_resume(&self, thread_id: impl Into<String>) -> mpsc::Receiver<StreamEvent> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let graph = self.clone();
        let thread_id = thread_id.into();

        tokio::spawn(async move {
            if let Err(e) = graph.resume(&thread_id, &tx).await {
                tracing::debug!("GRAPH: spawned resume ended with {}", e.kind());
            }
        });

        rx
    }

    /// Persisted display log; empty for an unknown thread
    pub async fn get_history(&self, thread_id: &str) -> Result<Vec<ChatMessage>> {
        let checkpoint = self.load_checkpoint(thread_id).await?;
        Ok(checkpoint
            .map(|checkpoint| checkpoint.state.chat_history)
            .unwrap_or_default())
    }

    async fn execute_turn(
        &self,
        input: TurnInput,
        events: &EventSender,
    ) -> Result<(AssistantState, usize)> {
        let input = validate(input)?;
        let thread_id = input.thread_id;

        let (state, dangling) = match self.load_checkpoint(&thread_id).await? {
            Some(checkpoint) => {
                let dangling = checkpoint.next == Some(NodeType::Tool);
                (checkpoint.state, dangling)
            }
            None => {
                tracing::info!("GRAPH: new thread={}", thread_id);
                let mut state = AssistantState::new();
                state.messages.push(Message::system(self.system_prompt.as_ref()));
                (state, false)
            }
        };

        // caller's snapshot always wins over persisted values
        let mut state = state.apply(
            StateUpdate::new()
                .action(TripAction::Set { trip: input.trip })
                .action(PackingListAction::Set {
                    items: input.packing_list,
                }),
        );

        if dangling && state.has_pending_tool_calls() {
            tracing::info!(
                "GRAPH: resolving {} dangling tool call(s) thread={}",
                state.pending_tool_calls().len(),
                thread_id
            );
            let update = self.tool_node.execute(&state).await?;
            state = state.apply(update);
        }

        let state = state.apply(
            StateUpdate::new()
                .message(Message::human(input.message.as_str()))
                .chat(ChatMessage::user(input.message)),
        );

        self.save_checkpoint(&Checkpoint::new(
            thread_id.as_str(),
            state.clone(),
            Some(NodeType::LLM),
            0,
        ))
        .await?;
        emit(events, StreamEvent::snapshot(0, None, &state)).await?;

        self.drive(&thread_id, state, NodeType::LLM, 0, events).await
    }

    async fn execute_resume(
        &self,
        thread_id: &str,
        events: &EventSender,
    ) -> Result<(AssistantState, usize)> {
        let checkpoint = self
            .load_checkpoint(thread_id)
            .await?
            .ok_or_else(|| GraphError::ThreadNotFound(thread_id.to_string()))?;

        match checkpoint.next {
            None => {
                tracing::info!("GRAPH: thread={} has no unfinished turn", thread_id);
                Ok((checkpoint.state, checkpoint.step))
            }
            Some(next) => {
                self.drive(thread_id, checkpoint.state, next, checkpoint.step, events)
                    .await
            }
        }
    }

    /// Alternate nodes until the router ends the turn
    async fn drive(
        &self,
        thread_id: &str,
        mut state: AssistantState,
        start: NodeType,
        mut step: usize,
        events: &EventSender,
    ) -> Result<(AssistantState, usize)> {
        let mut current = start;
        let mut executed = 0;

        loop {
            // Guardrail: max iterations
            if executed >= self.config.max_iterations {
                return Err(GraphError::MaxIterations(self.config.max_iterations));
            }

            let node_start = Instant::now();
            let update = self.node(current).execute(&state).await?;
            state = state.apply(update);
            step += 1;
            executed += 1;

            let next = self.router.next(&state, current).node();
            tracing::info!(
                "GRAPH: step={} node={:?} next={:?} took={}ms",
                step,
                current,
                next,
                node_start.elapsed().as_millis()
            );

            self.save_checkpoint(&Checkpoint::new(thread_id, state.clone(), next, step))
                .await?;
            emit(events, StreamEvent::snapshot(step, Some(current), &state)).await?;

            match next {
                Some(node) => current = node,
                None => return Ok((state, step)),
            }
        }
    }

    /// Emit the single terminal event for a turn
    async fn finish(
        &self,
        thread_id: &str,
        outcome: Result<(AssistantState, usize)>,
        started: Instant,
        events: &EventSender,
    ) -> Result<AssistantState> {
        let total_duration_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok((state, steps)) => {
                emit(events, StreamEvent::done(steps, total_duration_ms)).await?;
                tracing::info!(
                    "GRAPH: turn finished thread={} steps={} duration={}ms",
                    thread_id,
                    steps,
                    total_duration_ms
                );
                Ok(state)
            }
            Err(GraphError::StreamClosed) => {
                tracing::warn!("GRAPH: consumer went away, turn aborted thread={}", thread_id);
                Err(GraphError::StreamClosed)
            }
            Err(e) => {
                tracing::error!("GRAPH: turn failed thread={}: {}", thread_id, e);
                let _ = events
                    .send(StreamEvent::error(e.kind(), e.to_string()))
                    .await;
                Err(e)
            }
        }
    }

    fn node(&self, node_type: NodeType) -> &Arc<dyn Node> {
        match node_type {
            NodeType::LLM => &self.llm_node,
            NodeType::Tool => &self.tool_node,
        }
    }

    async fn load_checkpoint(&self, thread_id: &str) -> Result<Option<Checkpoint>> {
        let timeout = self.config.checkpoint_timeout;
        tokio::time::timeout(timeout, self.checkpointer.load(thread_id))
            .await
            .map_err(|_| GraphError::PersistenceTimeout(timeout.as_millis() as u64))?
            .map_err(GraphError::from)
    }

    async fn save_checkpoint(&self, checkpoint: &Checkpoint) -> Result<()> {
        let timeout = self.config.checkpoint_timeout;
        tokio::time::timeout(timeout, self.checkpointer.save(checkpoint))
            .await
            .map_err(|_| GraphError::PersistenceTimeout(timeout.as_millis() as u64))?
            .map_err(GraphError::from)
    }
}

async fn emit(events: &EventSender, event: StreamEvent) -> Result<()> {
    events.send(event).await.map_err(|_| GraphError::StreamClosed)
}

fn validate(input: TurnInput) -> Result<TurnInput> {
    if input.thread_id.trim().is_empty() {
        return Err(GraphError::InvalidInput("thread id is required".to_string()));
    }
    if input.message.trim().is_empty() {
        return Err(GraphError::InvalidInput("user message is required".to_string()));
    }
    Ok(input)
}
