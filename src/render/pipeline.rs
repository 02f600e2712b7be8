use std::collections::HashMap;
use std::sync::{Arc, mpsc};

use rayon::prelude::*;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{FrameloomError, FrameloomResult};
use crate::render::raster::{FrameRGBA, Rasterizer};
use crate::scene::SceneSource;
use crate::scene::fingerprint::{SceneFingerprint, fingerprint_scene};
use crate::scene::graph::Scene;

const MAX_REORDER_BUFFER_BYTES: u64 = 128 * 1024 * 1024;

/// Options controlling [`render_range`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOpts {
    /// Enable frame-level parallelism (rayon), using a dedicated thread pool.
    pub parallel: bool,
    /// Chunk size used by the render->encode streaming pipeline.
    pub chunk_size: usize,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Rasterize each distinct scene once per chunk and reuse its pixels for repeats.
    pub static_frame_elision: bool,
    /// Bounded channel capacity between render workers and the encoder thread.
    pub channel_capacity: usize,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            static_frame_elision: false,
            channel_capacity: 4,
        }
    }
}

/// Range render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Total frames in the requested range.
    pub frames_total: u64,
    /// Frames actually rasterized (may be < total when static-frame elision is enabled).
    pub frames_rendered: u64,
    /// Frames elided due to static-frame elision.
    pub frames_elided: u64,
}

impl RenderStats {
    fn absorb(&mut self, other: RenderStats) {
        self.frames_total += other.frames_total;
        self.frames_rendered += other.frames_rendered;
        self.frames_elided += other.frames_elided;
    }
}

/// Sample and rasterize a single frame.
///
/// Returns **premultiplied** RGBA8 pixels at the scene's canvas size.
#[tracing::instrument(skip(source, raster), fields(scene = %source.spec().id))]
pub fn render_frame(
    source: &dyn SceneSource,
    frame: FrameIndex,
    raster: &Rasterizer,
) -> FrameloomResult<FrameRGBA> {
    if frame.0 >= source.spec().duration_frames {
        return Err(FrameloomError::validation(
            "render_frame frame must be within scene duration",
        ));
    }
    let scene = source.sample(frame)?;
    raster.render_scene(&scene)
}

/// Render a frame range and stream frames into a sink.
///
/// The sink receives frames in strictly increasing frame index order. When `parallel` is
/// enabled, out-of-order worker completion is reordered at the sink boundary (bounded channel
/// backpressure).
#[tracing::instrument(skip(source, raster, opts, sink), fields(scene = %source.spec().id))]
pub fn render_range(
    source: &dyn SceneSource,
    range: FrameRange,
    raster: &Rasterizer,
    opts: &RenderOpts,
    sink: &mut dyn FrameSink,
) -> FrameloomResult<RenderStats> {
    let spec = source.spec();
    if range.is_empty() {
        return Err(FrameloomError::validation(
            "render_range range must be non-empty",
        ));
    }
    if range.end.0 > spec.duration_frames {
        return Err(FrameloomError::validation(
            "render_range range must be within scene duration",
        ));
    }

    let cfg = SinkConfig {
        width: spec.canvas.width,
        height: spec.canvas.height,
        fps: spec.fps,
    };

    let cap = opts.channel_capacity.max(1);
    let bytes_per_frame = u64::from(cfg.width)
        .saturating_mul(u64::from(cfg.height))
        .saturating_mul(4)
        .max(1);
    let max_chunk_by_mem = (MAX_REORDER_BUFFER_BYTES / bytes_per_frame).max(1);

    let mut chunk_size = normalized_chunk_size(opts.chunk_size).min(max_chunk_by_mem);
    chunk_size = chunk_size.min(range.len_frames());

    let pool = if opts.parallel {
        Some(build_thread_pool(opts.threads)?)
    } else {
        None
    };

    tracing::info!(
        start = range.start.0,
        end = range.end.0,
        parallel = opts.parallel,
        chunk_size,
        elision = opts.static_frame_elision,
        "rendering range"
    );

    // The encoder thread owns the sink and enforces in-order delivery regardless of render
    // completion order.
    let stats = std::thread::scope(|scope| -> FrameloomResult<RenderStats> {
        let (tx, rx) = mpsc::sync_channel::<FrameMsg>(cap);
        let range_start = range.start.0;
        let range_end = range.end.0;
        let sink_ref: &mut dyn FrameSink = sink;

        let enc = scope.spawn(move || -> FrameloomResult<()> {
            sink_ref.begin(cfg)?;

            let mut next = range_start;
            let mut pending = HashMap::<u64, Arc<FrameRGBA>>::new();
            while next < range_end {
                if let Some(frame) = pending.remove(&next) {
                    sink_ref.push_frame(FrameIndex(next), &frame)?;
                    next += 1;
                    continue;
                }

                let msg = rx.recv().map_err(|_| {
                    FrameloomError::render("encoder channel disconnected unexpectedly")
                })?;
                pending.insert(msg.idx.0, msg.frame);
            }

            sink_ref.end()
        });

        let mut stats = RenderStats::default();
        let produce_res = (|| -> FrameloomResult<()> {
            let mut chunk_start = range_start;
            while chunk_start < range_end {
                let chunk_end = (chunk_start + chunk_size).min(range_end);
                let ctx = ChunkCtx {
                    source,
                    raster,
                    tx: &tx,
                };
                let chunk_stats = match (pool.as_ref(), opts.static_frame_elision) {
                    (Some(pool), true) => {
                        render_chunk_parallel_elided(&ctx, pool, chunk_start, chunk_end)?
                    }
                    (Some(pool), false) => {
                        render_chunk_parallel(&ctx, pool, chunk_start, chunk_end)?
                    }
                    (None, elide) => render_chunk_sequential(&ctx, elide, chunk_start, chunk_end)?,
                };
                tracing::debug!(
                    chunk_start,
                    chunk_end,
                    rendered = chunk_stats.frames_rendered,
                    "chunk done"
                );
                stats.absorb(chunk_stats);
                chunk_start = chunk_end;
            }
            Ok(())
        })();

        drop(tx);
        let enc_res = enc
            .join()
            .map_err(|_| FrameloomError::render("encoder thread panicked"))?;

        // A failed send only means the encoder already stopped; its own error is the cause.
        match (produce_res, enc_res) {
            (Err(p), Err(e)) if is_encoder_closed(&p) => Err(e),
            (Err(p), _) => Err(p),
            (Ok(()), enc) => enc.map(|()| stats),
        }
    })?;

    tracing::info!(
        total = stats.frames_total,
        rendered = stats.frames_rendered,
        elided = stats.frames_elided,
        "range rendered"
    );
    Ok(stats)
}

#[derive(Debug)]
struct FrameMsg {
    idx: FrameIndex,
    frame: Arc<FrameRGBA>,
}

struct ChunkCtx<'a> {
    source: &'a dyn SceneSource,
    raster: &'a Rasterizer,
    tx: &'a mpsc::SyncSender<FrameMsg>,
}

const ENCODER_CLOSED: &str = "encoder thread is not accepting frames";

fn send(tx: &mpsc::SyncSender<FrameMsg>, f: u64, frame: Arc<FrameRGBA>) -> FrameloomResult<()> {
    tx.send(FrameMsg {
        idx: FrameIndex(f),
        frame,
    })
    .map_err(|_| FrameloomError::render(ENCODER_CLOSED))
}

fn is_encoder_closed(e: &FrameloomError) -> bool {
    matches!(e, FrameloomError::Render(msg) if msg == ENCODER_CLOSED)
}

fn render_chunk_sequential(
    ctx: &ChunkCtx<'_>,
    elide: bool,
    start: u64,
    end: u64,
) -> FrameloomResult<RenderStats> {
    let mut stats = RenderStats {
        frames_total: end - start,
        ..RenderStats::default()
    };
    let mut cache = HashMap::<SceneFingerprint, Arc<FrameRGBA>>::new();
    for f in start..end {
        let scene = ctx.source.sample(FrameIndex(f))?;
        if elide {
            let fp = fingerprint_scene(&scene);
            if let Some(frame) = cache.get(&fp) {
                stats.frames_elided += 1;
                send(ctx.tx, f, frame.clone())?;
                continue;
            }
            let frame = Arc::new(ctx.raster.render_scene(&scene)?);
            cache.insert(fp, frame.clone());
            stats.frames_rendered += 1;
            send(ctx.tx, f, frame)?;
        } else {
            let frame = ctx.raster.render_scene(&scene)?;
            stats.frames_rendered += 1;
            send(ctx.tx, f, Arc::new(frame))?;
        }
    }
    Ok(stats)
}

fn render_chunk_parallel(
    ctx: &ChunkCtx<'_>,
    pool: &rayon::ThreadPool,
    start: u64,
    end: u64,
) -> FrameloomResult<RenderStats> {
    let (source, raster) = (ctx.source, ctx.raster);
    let tx = ctx.tx.clone();
    pool.install(move || {
        (start..end).into_par_iter().try_for_each_with(
            tx,
            |tx, f| -> FrameloomResult<()> {
                let scene = source.sample(FrameIndex(f))?;
                let frame = raster.render_scene(&scene)?;
                send(tx, f, Arc::new(frame))
            },
        )
    })?;
    Ok(RenderStats {
        frames_total: end - start,
        frames_rendered: end - start,
        frames_elided: 0,
    })
}

fn render_chunk_parallel_elided(
    ctx: &ChunkCtx<'_>,
    pool: &rayon::ThreadPool,
    start: u64,
    end: u64,
) -> FrameloomResult<RenderStats> {
    let (source, raster) = (ctx.source, ctx.raster);
    let sampled = pool.install(|| {
        (start..end)
            .into_par_iter()
            .map(|f| -> FrameloomResult<(SceneFingerprint, Scene)> {
                let scene = source.sample(FrameIndex(f))?;
                Ok((fingerprint_scene(&scene), scene))
            })
            .collect::<FrameloomResult<Vec<_>>>()
    })?;

    let mut uniq = Vec::<&Scene>::new();
    let mut map = Vec::<usize>::with_capacity(sampled.len());
    let mut seen = HashMap::<SceneFingerprint, usize>::new();
    for (fp, scene) in &sampled {
        let u = *seen.entry(*fp).or_insert_with(|| {
            uniq.push(scene);
            uniq.len() - 1
        });
        map.push(u);
    }

    let unique_frames = pool.install(|| {
        uniq.par_iter()
            .map(|scene| raster.render_scene(scene).map(Arc::new))
            .collect::<FrameloomResult<Vec<_>>>()
    })?;

    for (f, &u) in (start..end).zip(&map) {
        send(ctx.tx, f, unique_frames[u].clone())?;
    }

    let total = end - start;
    let rendered = unique_frames.len() as u64;
    Ok(RenderStats {
        frames_total: total,
        frames_rendered: rendered,
        frames_elided: total.saturating_sub(rendered),
    })
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

fn build_thread_pool(threads: Option<usize>) -> FrameloomResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FrameloomError::validation(
            "render_range 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FrameloomError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
