//! The line-by-line dispatch loop.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

use crate::notify::Notifier;
use crate::{assemble, event};

/// Processes newline-delimited apply events until end of input.
///
/// Each line is parsed, rendered once per destination, and delivered to
/// every sink in order before the next line is read. A malformed line or a
/// failed delivery aborts the run; an event flagged with an upstream error
/// is still dispatched, with the error rendered into the body.
pub async fn run<R>(
    reader: R,
    region: &str,
    sinks: &[Box<dyn Notifier>],
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let change = event::parse_event(&line)?;
        let title = assemble::title(&change, region);
        let tags = assemble::tags(&change, region);

        for sink in sinks {
            let body =
                assemble::body(&change, sink.style(), sink.max_body_len());
            sink.send(&title, &body, &tags)
                .await
                .with_context(|| format!("delivery to {} failed", sink.name()))?;
        }
        info!(title = %title, "event dispatched");
    }
    Ok(())
}
