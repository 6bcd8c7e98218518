use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};

use super::request::CommandRequest;
use super::result::{AggregateStatus, CommandResult, Mode, SequenceResult};

/// The single-invoke primitive. Never fails: every outcome is a [`CommandResult`].
#[async_trait]
pub trait Invoker: Send + Sync {
    async fn invoke(&self, request: &CommandRequest) -> CommandResult;
}

#[derive(Default)]
struct Tally {
    successful: usize,
    failed: usize,
    results: Vec<CommandResult>,
}

impl Tally {
    fn push(mut self, result: CommandResult) -> Self {
        if result.is_success() {
            self.successful += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
        self
    }

    fn finish(self) -> SequenceResult {
        SequenceResult {
            mode: Mode::Sequence,
            total_commands: self.results.len(),
            successful: self.successful,
            failed: self.failed,
            status: AggregateStatus::from_counts(self.successful, self.failed),
            results: self.results,
        }
    }
}

/// Runs commands strictly one after another, never short-circuiting.
pub struct SequenceExecutor<'a> {
    invoker: &'a dyn Invoker,
}

impl<'a> SequenceExecutor<'a> {
    pub fn new(invoker: &'a dyn Invoker) -> Self {
        Self { invoker }
    }

    pub async fn run(&self, commands: Vec<CommandRequest>) -> SequenceResult {
        let total = commands.len();
        tracing::info!(total, "sequence started");

        let tally = stream::iter(commands.into_iter().enumerate())
            .then(|(index, cmd)| async move {
                tracing::debug!(index, operation = %cmd.operation_name, "sequence step");
                self.invoker.invoke(&cmd).await.at_index(index)
            })
            .fold(Tally::default(), |tally, result| async move { tally.push(result) })
            .await;

        let result = tally.finish();
        tracing::info!(
            total,
            successful = result.successful,
            failed = result.failed,
            status = ?result.status,
            "sequence finished"
        );
        result
    }
}
