use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream;
use futures::{Stream, StreamExt};

use crate::domain::Value;
use crate::engine::{CDict, EngineError};

/// Async view of an expression's iteration
///
/// Evaluation is still synchronous: each poll pulls one value from the lazy
/// iterator and is always ready.
pub struct RecordStream<'a> {
    inner: Pin<Box<dyn Stream<Item = Result<Value, EngineError>> + Send + 'a>>,
}

impl<'a> RecordStream<'a> {
    pub fn new(node: &'a CDict) -> Self {
        Self {
            inner: Box::pin(stream::iter(node.iter())),
        }
    }
}

impl Stream for RecordStream<'_> {
    type Item = Result<Value, EngineError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl CDict {
    /// Start a fresh iteration as a `futures::Stream`
    pub fn stream(&self) -> RecordStream<'_> {
        RecordStream::new(self)
    }
}

/// Drain a stream of values, stopping at the first error
pub async fn collect_stream<S>(mut stream: S) -> Result<Vec<Value>, EngineError>
where
    S: Stream<Item = Result<Value, EngineError>> + Unpin,
{
    let mut values = Vec::new();
    while let Some(result) = stream.next().await {
        values.push(result?);
    }
    Ok(values)
}
