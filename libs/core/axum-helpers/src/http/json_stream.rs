//! Streams a sequence of items as a single JSON array body.

use axum::{
    body::{Body, Bytes},
    http::header,
    response::{IntoResponse, Response},
};
use futures::{Stream, StreamExt};
use serde::Serialize;
use std::fmt::Display;
use std::io;

/// Response that writes `[item,item,...]` chunk by chunk as `inner` yields.
///
/// Nothing is buffered beyond one encoded item. An `Err` from `inner` after the
/// status line has gone out cannot become an error envelope; it is logged and the
/// body is aborted so the client sees a truncated transfer rather than valid JSON.
pub struct JsonArrayStream<S>(pub S);

impl<S, T, E> IntoResponse for JsonArrayStream<S>
where
    S: Stream<Item = Result<T, E>> + Send + 'static,
    T: Serialize + Send + 'static,
    E: Display + Send + 'static,
{
    fn into_response(self) -> Response {
        let items = self.0;

        let body = async_stream::stream! {
            yield Ok::<Bytes, io::Error>(Bytes::from_static(b"["));

            futures::pin_mut!(items);
            let mut first = true;

            while let Some(item) = items.next().await {
                let encoded = match item {
                    Ok(value) => serde_json::to_vec(&value).map_err(io::Error::other),
                    Err(e) => Err(io::Error::other(e.to_string())),
                };

                match encoded {
                    Ok(json) => {
                        let mut chunk = Vec::with_capacity(json.len() + 1);
                        if !first {
                            chunk.push(b',');
                        }
                        chunk.extend_from_slice(&json);
                        first = false;
                        yield Ok(Bytes::from(chunk));
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Aborting streamed JSON array");
                        yield Err(e);
                        return;
                    }
                }
            }

            yield Ok(Bytes::from_static(b"]"));
        };

        (
            [(header::CONTENT_TYPE, "application/json")],
            Body::from_stream(body),
        )
            .into_response()
    }
}
