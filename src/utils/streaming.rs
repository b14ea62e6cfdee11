//! Common Streaming Utilities
//!
//! Turns an HTTP response body into a [`TextStream`]. Two framings are supported:
//! Server-Sent Events (OpenAI, Anthropic, Gemini), parsed with eventsource-stream
//! for UTF-8 and line buffering, and newline-delimited JSON (Ollama).
//!
//! Both variants pull lazily from the body, skip events without text, stop after
//! the first error, and own the response so that dropping the stream releases
//! the connection.

use crate::error::LlmError;
use crate::stream::TextStream;
use crate::transformers::stream::StreamChunkTransformer;
use crate::utils::error_handling::ensure_success;
use eventsource_stream::Eventsource;
use futures::Stream;
use futures_util::StreamExt;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

/// Wire framing of a provider's streaming endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamFormat {
    /// `text/event-stream`
    Sse,
    /// One JSON object per line
    JsonLines,
}

/// Stream factory for creating provider streams
pub struct StreamFactory;

impl StreamFactory {
    /// Send a streaming request and frame its body according to `format`.
    ///
    /// `timeout` bounds the wait for the response head only; reading the body is
    /// unbounded so long generations are not cut off.
    pub async fn create_text_stream(
        request_builder: reqwest::RequestBuilder,
        format: StreamFormat,
        converter: Arc<dyn StreamChunkTransformer>,
        timeout: Duration,
    ) -> Result<TextStream, LlmError> {
        let response = tokio::time::timeout(timeout, request_builder.send())
            .await
            .map_err(|_| {
                LlmError::HttpError(format!(
                    "Timed out after {}s waiting for {} stream",
                    timeout.as_secs(),
                    converter.provider_id()
                ))
            })?
            .map_err(|e| LlmError::HttpError(format!("Failed to send request: {e}")))?;
        let response = ensure_success(response).await?;

        let bytes = response.bytes_stream();
        Ok(match format {
            StreamFormat::Sse => Self::sse_from_bytes(bytes, converter),
            StreamFormat::JsonLines => Self::json_lines_from_bytes(bytes, converter),
        })
    }

    /// Frame a byte stream as Server-Sent Events.
    ///
    /// A `[DONE]` payload ends the stream.
    pub fn sse_from_bytes<S, B, E>(bytes: S, converter: Arc<dyn StreamChunkTransformer>) -> TextStream
    where
        S: Stream<Item = Result<B, E>> + Send + 'static,
        B: AsRef<[u8]> + Send + 'static,
        E: Display + Send + 'static,
    {
        let stream = async_stream::stream! {
            let mut events = Box::pin(bytes.eventsource());
            while let Some(event) = events.next().await {
                let event = match event {
                    Ok(event) => event,
                    Err(e) => {
                        yield Err(LlmError::StreamError(format!("SSE parsing error: {e}")));
                        return;
                    }
                };

                let data = event.data.trim();
                if data == "[DONE]" {
                    return;
                }
                if data.is_empty() {
                    continue;
                }

                tracing::debug!("{} SSE event: {}", converter.provider_id(), data);
                match converter.convert_event(data) {
                    Ok(Some(fragment)) if !fragment.is_empty() => yield Ok(fragment),
                    Ok(_) => {}
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }
        };
        Box::pin(stream)
    }

    /// Frame a byte stream as newline-delimited JSON.
    ///
    /// Lines may be split across chunks; a final line without a trailing newline
    /// is still converted.
    pub fn json_lines_from_bytes<S, B, E>(
        bytes: S,
        converter: Arc<dyn StreamChunkTransformer>,
    ) -> TextStream
    where
        S: Stream<Item = Result<B, E>> + Send + 'static,
        B: AsRef<[u8]> + Send + 'static,
        E: Display + Send + 'static,
    {
        let stream = async_stream::stream! {
            let mut bytes = Box::pin(bytes);
            let mut buffer: Vec<u8> = Vec::new();
            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        yield Err(LlmError::StreamError(format!("Stream error: {e}")));
                        return;
                    }
                };
                buffer.extend_from_slice(chunk.as_ref());
                for item in drain_lines(&mut buffer, converter.as_ref()) {
                    let stop = item.is_err();
                    yield item;
                    if stop {
                        return;
                    }
                }
            }

            // Trailing line without newline
            if let Some(item) = convert_line(&buffer, converter.as_ref()).transpose() {
                yield item;
            }
        };
        Box::pin(stream)
    }
}

/// Convert every complete line in `buffer`, leaving a partial line behind.
///
/// Stops at the first error, which is the last element of the result.
fn drain_lines(
    buffer: &mut Vec<u8>,
    converter: &dyn StreamChunkTransformer,
) -> Vec<Result<String, LlmError>> {
    let mut out = Vec::new();
    while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
        let line: Vec<u8> = buffer.drain(..=pos).collect();
        match convert_line(&line, converter) {
            Ok(Some(fragment)) => out.push(Ok(fragment)),
            Ok(None) => {}
            Err(e) => {
                out.push(Err(e));
                buffer.clear();
                break;
            }
        }
    }
    out
}

fn convert_line(
    line: &[u8],
    converter: &dyn StreamChunkTransformer,
) -> Result<Option<String>, LlmError> {
    let line = String::from_utf8_lossy(line);
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    tracing::debug!("{} stream line: {}", converter.provider_id(), line);
    Ok(converter
        .convert_event(line)?
        .filter(|fragment| !fragment.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use std::io;

    /// Echoes the payload back, treats `skip` as control-only and `fail` as an error
    struct EchoConverter;

    impl StreamChunkTransformer for EchoConverter {
        fn provider_id(&self) -> &str {
            "echo"
        }

        fn convert_event(&self, data: &str) -> Result<Option<String>, LlmError> {
            match data {
                "skip" => Ok(None),
                "empty" => Ok(Some(String::new())),
                "fail" => Err(LlmError::api_error(500, "backend failed")),
                other => Ok(Some(other.to_string())),
            }
        }
    }

    fn chunks(parts: &[&str]) -> Vec<Result<Vec<u8>, io::Error>> {
        parts.iter().map(|p| Ok(p.as_bytes().to_vec())).collect()
    }

    async fn collect(stream: TextStream) -> Vec<Result<String, LlmError>> {
        stream.collect().await
    }

    #[tokio::test]
    async fn sse_preserves_order_and_skips_empty() {
        let body = chunks(&[
            "data: one\n\n",
            "data: skip\n\ndata: empty\n\n",
            "data: two\n\ndata: thr",
            "ee\n\n",
            "data: [DONE]\n\n",
            "data: after-done\n\n",
        ]);
        let out = collect(StreamFactory::sse_from_bytes(
            stream::iter(body),
            Arc::new(EchoConverter),
        ))
        .await;
        let texts: Vec<String> = out.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn sse_stops_after_error() {
        let body = chunks(&["data: a\n\ndata: fail\n\ndata: b\n\n"]);
        let out = collect(StreamFactory::sse_from_bytes(
            stream::iter(body),
            Arc::new(EchoConverter),
        ))
        .await;
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].as_deref().unwrap(), "a");
        assert!(matches!(out[1], Err(LlmError::ApiError { code: 500, .. })));
    }

    #[tokio::test]
    async fn transport_errors_surface_as_stream_errors() {
        let body: Vec<Result<Vec<u8>, io::Error>> = vec![
            Ok(b"first\n".to_vec()),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
            Ok(b"never\n".to_vec()),
        ];
        let out = collect(StreamFactory::json_lines_from_bytes(
            stream::iter(body),
            Arc::new(EchoConverter),
        ))
        .await;
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].as_deref().unwrap(), "first");
        assert!(matches!(&out[1], Err(e) if e.is_transport()));
    }

    #[tokio::test]
    async fn json_lines_reassemble_split_lines() {
        let body = chunks(&["al", "pha\nskip\n\nbe", "ta\nempty\ngam", "ma"]);
        let out = collect(StreamFactory::json_lines_from_bytes(
            stream::iter(body),
            Arc::new(EchoConverter),
        ))
        .await;
        let texts: Vec<String> = out.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(texts, vec!["alpha", "beta", "gamma"]);
    }

    #[tokio::test]
    async fn json_lines_stop_after_error() {
        let body = chunks(&["x\nfail\ny\n", "z\n"]);
        let out = collect(StreamFactory::json_lines_from_bytes(
            stream::iter(body),
            Arc::new(EchoConverter),
        ))
        .await;
        assert_eq!(out.len(), 2);
        assert!(out[1].is_err());
    }

    #[tokio::test]
    async fn early_drop_does_not_poll_further() {
        let body = chunks(&["data: one\n\n", "data: two\n\n"]);
        let mut stream = StreamFactory::sse_from_bytes(stream::iter(body), Arc::new(EchoConverter));
        assert_eq!(stream.next().await.unwrap().unwrap(), "one");
        drop(stream);
    }
}
