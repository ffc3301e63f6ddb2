use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::Receiver;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::events::{AcquireTexture, TextureEvent};
use crate::texture::{CardImage, cover_fit};

// Decodes an image to RGBA8 and applies EXIF orientation if available.
// Orientation handling is best-effort; if metadata is missing, the
// original orientation is preserved.
fn decode_rgba8_apply_exif(path: &Path) -> anyhow::Result<image::RgbaImage> {
    let img = image::ImageReader::open(path)?
        .with_guessed_format()? // sniff based on content/extension
        .decode()?;

    let mut img = img.to_rgba8();

    let orientation: u16 = read_orientation(path).unwrap_or(1);
    // Map common EXIF orientations. Unsupported cases fall through as-is.
    match orientation {
        1 => {}
        2 => {
            img = image::imageops::flip_horizontal(&img);
        }
        3 => {
            img = image::imageops::rotate180(&img);
        }
        4 => {
            img = image::imageops::flip_vertical(&img);
        }
        5 => {
            img = image::imageops::rotate90(&img);
            img = image::imageops::flip_horizontal(&img);
        }
        6 => {
            img = image::imageops::rotate90(&img);
        }
        7 => {
            img = image::imageops::rotate270(&img);
            img = image::imageops::flip_horizontal(&img);
        }
        8 => {
            img = image::imageops::rotate270(&img);
        }
        _ => {}
    }

    Ok(img)
}

fn read_orientation(path: &Path) -> Option<u16> {
    let file = File::open(path).ok()?;
    let mut buf = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut buf).ok()?;
    if let Some(field) = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY) {
        if let Some(val) = field.value.get_uint(0) {
            let o = val as u16;
            debug!("exif orientation {} for {}", o, path.display());
            return Some(o);
        }
    }
    None
}

fn load_card_image(path: &Path, target_aspect: f32) -> anyhow::Result<CardImage> {
    let rgba8 = decode_rgba8_apply_exif(path)?;
    let (width, height) = rgba8.dimensions();
    Ok(CardImage {
        width,
        height,
        pixels: rgba8.into_raw(),
        fit: cover_fit(width, height, target_aspect),
    })
}

/// Texture acquisition task.
///
/// Rules:
/// - Decode requests off-thread, at most `max_in_flight` at a time.
/// - Never block the frame loop: completions go into an unbounded
///   crossbeam channel the frame step drains at its own pace.
/// - A failed decode is a `Failed` completion, not an error; the store
///   substitutes a placeholder.
/// - Requests carry the store epoch through untouched so the store can
///   reject completions that outlive a reconcile.
pub async fn run(
    mut req_rx: Receiver<AcquireTexture>,
    completions: crossbeam_channel::Sender<TextureEvent>,
    target_aspect: f32,
    cancel: CancellationToken,
    max_in_flight: usize,
) -> Result<()> {
    let mut tasks: JoinSet<(AcquireTexture, Option<CardImage>)> = JoinSet::new();
    let mut closed = false;

    loop {
        if closed && tasks.is_empty() {
            break;
        }
        select! {
            _ = cancel.cancelled() => break,

            // Accept new requests while under limit
            maybe_req = req_rx.recv(), if !closed && tasks.len() < max_in_flight => {
                let Some(req) = maybe_req else {
                    // Finish in-flight decodes, then exit.
                    closed = true;
                    continue;
                };
                tasks.spawn({
                    let path = req.source.clone();
                    async move {
                        let res = tokio::task::spawn_blocking(move || {
                            load_card_image(&path, target_aspect)
                        })
                        .await;
                        (req, res.ok().and_then(|r| r.ok()))
                    }
                });
            }

            // Handle completed decodes as they finish
            Some(join_res) = tasks.join_next() => {
                let Ok((req, maybe_img)) = join_res else {
                    continue;
                };
                let AcquireTexture { slot, epoch, source } = req;
                let event = match maybe_img {
                    Some(image) => {
                        debug!(slot, source = %source.display(), "texture ready");
                        TextureEvent::Ready { slot, epoch, source, image }
                    }
                    None => {
                        debug!(slot, source = %source.display(), "texture failed");
                        TextureEvent::Failed { slot, epoch, source }
                    }
                };
                if completions.send(event).is_err() {
                    // Frame loop is gone; nothing left to feed.
                    break;
                }
            }
        }
    }
    Ok(())
}
