// Copyright (C) 2020-2026 Andy Kurnia.

use letterpress::{adjacency, engine_config, error, kibitzer, movegen, word_index};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt};

// One JSON question per line in, one JSON line out. Failures come back as
// { "error": "...", "stage": "..." } and the connection stays open.
#[derive(serde::Serialize)]
struct ErrorReply {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<&'static str>,
}

fn reply_line(move_generator: &movegen::MoveGenerator, line: &str) -> String {
    match kibitzer::answer_json(move_generator, line)
        .and_then(|answer| Ok(serde_json::to_string(&answer)?))
    {
        Ok(s) => s,
        Err(err) => {
            tracing::debug!(%err, "bad question");
            let reply = match err.downcast_ref::<error::PressError>() {
                Some(e) => ErrorReply {
                    error: e.message().to_string(),
                    stage: Some(e.stage())
                        .filter(|&stage| stage != error::Stage::Other)
                        .map(error::Stage::name),
                },
                None => ErrorReply {
                    error: err.to_string(),
                    stage: None,
                },
            };
            serde_json::to_string(&reply).unwrap_or_else(|_| r#"{"error":"unprintable"}"#.into())
        }
    }
}

async fn handle_connection(
    move_generator: std::sync::Arc<movegen::MoveGenerator>,
    stream: tokio::net::TcpStream,
    peer: std::net::SocketAddr,
) -> error::Returns<()> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = tokio::io::BufReader::new(reader).lines();
    let mut num_questions = 0u64;
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let move_generator = std::sync::Arc::clone(&move_generator);
        let mut reply =
            tokio::task::spawn_blocking(move || reply_line(&move_generator, &line)).await?;
        reply.push('\n');
        writer.write_all(reply.as_bytes()).await?;
        num_questions += 1;
    }
    tracing::info!(%peer, num_questions, "disconnected");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

// usage: serve <words.csv> [addr] [key=value...] [-v]
// addr defaults to 127.0.0.1:4680.
#[tokio::main]
async fn main() -> error::Returns<()> {
    let args = std::env::args().collect::<Vec<_>>();
    letterpress::init_logging(args.iter().any(|a| a == "-v"));
    let args = args.into_iter().filter(|a| a != "-v").collect::<Vec<_>>();
    if args.len() < 2 {
        return Err("usage: serve <words.csv> [addr] [key=value...] [-v]".into());
    }

    let mut config = engine_config::make_default_engine_config();
    let mut addr = None;
    for arg in &args[2..] {
        if arg.contains('=') {
            config.apply_kv(arg)?;
        } else if addr.is_none() {
            addr = Some(arg.as_str());
        } else {
            return Err(format!("unexpected argument {:?}", arg).into());
        }
    }
    let addr = addr.unwrap_or("127.0.0.1:4680");

    let move_generator = std::sync::Arc::new(movegen::MoveGenerator::new(
        std::sync::Arc::new(word_index::WordIndex::from_csv_path(&args[1])?),
        adjacency::COMMON_ADJACENCY_TABLE.clone(),
        config,
    ));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(x) => x,
                    Err(err) => {
                        tracing::warn!(%err, "accept failed");
                        continue;
                    }
                };
                tracing::info!(%peer, "connected");
                let move_generator = std::sync::Arc::clone(&move_generator);
                tokio::spawn(async move {
                    if let Err(err) = handle_connection(move_generator, stream, peer).await {
                        tracing::warn!(%peer, %err, "connection ended with error");
                    }
                });
            }
            _ = &mut shutdown => {
                break;
            }
        }
    }

    let stats = move_generator.move_cache_stats();
    tracing::info!(
        hits = stats.hits,
        misses = stats.misses,
        cached = stats.len,
        "stopping"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_lines_become_error_replies() {
        let g = movegen::MoveGenerator::new(
            std::sync::Arc::new(
                word_index::WordIndex::from_csv_reader("bad,20\n".as_bytes()).unwrap(),
            ),
            adjacency::COMMON_ADJACENCY_TABLE.clone(),
            engine_config::make_uncached_engine_config(),
        );
        let v: serde_json::Value = serde_json::from_str(&reply_line(&g, "{")).unwrap();
        assert!(v["error"].is_string());
        assert!(v.get("stage").is_none());
        let v: serde_json::Value =
            serde_json::from_str(&reply_line(&g, r#"{ "board": "abc" }"#)).unwrap();
        assert_eq!(v["stage"], "board");
        assert_eq!(v["error"], "need 25 letters, found 3");
        let v: serde_json::Value = serde_json::from_str(&reply_line(
            &g,
            r#"{ "board": "abcdefghijklmnopqrstuvwxy" }"#,
        ))
        .unwrap();
        assert_eq!(v["total"], 1);
        assert_eq!(v["moves"][0]["word"], "bad");
    }
}
