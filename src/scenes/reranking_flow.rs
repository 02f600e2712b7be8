//! Retrieval and reranking pipeline: five pipeline stages, five reranking stages and the
//! resulting top-k documents, released one after another.

use crate::animation::ease::{Extrapolation, interpolate};
use crate::animation::spring::spring_progress;
use crate::foundation::core::{FrameIndex, Point};
use crate::foundation::error::FrameloomResult;
use crate::scene::graph::{
    Circle, Color, Def, GradientStop, Group, Line, Node, Paint, Polygon, Rect, Scene, Stroke,
    Styled, Text, TextAnchor,
};
use crate::scene::{SceneSource, SceneSpec};

/// Registry id.
pub const ID: &str = "RerankingFlow";
/// Registered length.
pub const DURATION_FRAMES: u64 = 600;

const VIEW_W: f64 = 900.0;
const VIEW_H: f64 = 600.0;

const STAGE_SPRING_FRAMES: f64 = 30.0;
const DOC_SPRING_FRAMES: f64 = 40.0;
const CONNECTOR_RAMP_FRAMES: f64 = 20.0;

/// Number of ranked documents shown at the bottom.
pub const TOP_K: u32 = 5;
const DOC_DELAY: f64 = 400.0;
const DOC_STAGGER: f64 = 20.0;
const DOC_SPACING: f64 = 120.0;
const DOC_ROW_STEP: f64 = 35.0;

const TEAL: Color = Color::hex(0x4ecdc4);
const MUTED: Color = Color::hex(0x888888);

/// A pipeline step drawn as a labelled disc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stage {
    /// Center, relative to its row.
    pub position: Point,
    /// Name under the icon.
    pub label: &'static str,
    /// Emoji icon.
    pub icon: &'static str,
    /// Fill color.
    pub color: Color,
    /// Fully grown diameter.
    pub size: f64,
    /// Release frame.
    pub delay: f64,
}

const fn stage(
    (x, y): (f64, f64),
    label: &'static str,
    icon: &'static str,
    color: u32,
    size: f64,
    delay: f64,
) -> Stage {
    Stage {
        position: Point::new(x, y),
        label,
        icon,
        color: Color::hex(color),
        size,
        delay,
    }
}

/// Query → vector retrieval → candidates → coarse ranking → reranking.
pub const PIPELINE: [Stage; 5] = [
    stage((150.0, 80.0), "用户查询", "🔍", 0xff6b6b, 80.0, 0.0),
    stage((320.0, 80.0), "向量检索", "📦", 0x4ecdc4, 80.0, 40.0),
    stage((490.0, 80.0), "召回候选", "📋", 0xffd93d, 90.0, 80.0),
    stage((660.0, 80.0), "粗排", "⚡", 0xa29bfe, 80.0, 120.0),
    stage((830.0, 80.0), "精排/重排", "🎯", 0xfd79a8, 95.0, 160.0),
];

/// The reranking stages in detail.
pub const RERANKERS: [Stage; 5] = [
    stage((120.0, 50.0), "Pointwise", "1️⃣", 0x74b9ff, 75.0, 200.0),
    stage((270.0, 50.0), "语义重排", "2️⃣", 0xa29bfe, 75.0, 240.0),
    stage((420.0, 50.0), "特征重排", "3️⃣", 0xfd79a8, 75.0, 280.0),
    stage((570.0, 50.0), "集成融合", "🔄", 0x00b894, 75.0, 320.0),
    stage((720.0, 50.0), "在线学习", "📈", 0xfdcb6e, 75.0, 360.0),
];

/// Horizontal arrow between two stages of a row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connector {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
    /// Release frame.
    pub delay: f64,
}

const fn connector(from_x: f64, to_x: f64, y: f64, delay: f64) -> Connector {
    Connector {
        from: Point::new(from_x, y),
        to: Point::new(to_x, y),
        delay,
    }
}

/// Arrows of the pipeline row.
pub const PIPELINE_CONNECTORS: [Connector; 4] = [
    connector(180.0, 260.0, 80.0, 20.0),
    connector(350.0, 430.0, 80.0, 60.0),
    connector(520.0, 600.0, 80.0, 100.0),
    connector(690.0, 770.0, 80.0, 140.0),
];

/// Arrows of the reranking row.
pub const RERANKER_CONNECTORS: [Connector; 4] = [
    connector(155.0, 210.0, 50.0, 220.0),
    connector(305.0, 360.0, 50.0, 260.0),
    connector(455.0, 510.0, 50.0, 300.0),
    connector(605.0, 660.0, 50.0, 340.0),
];

/// Linear ramp of a connector released at `delay`; negative before the release.
pub fn connector_progress(frame: FrameIndex, delay: f64) -> FrameloomResult<f64> {
    interpolate(
        frame.offset_from(delay),
        &[0.0, CONNECTOR_RAMP_FRAMES],
        &[0.0, 1.0],
        Extrapolation::CLAMP_RIGHT,
    )
}

/// Stage drawn at spring `progress`; `None` before release.
pub fn stage_node(stage: &Stage, progress: f64) -> Option<Node> {
    if progress <= 0.0 {
        return None;
    }
    Some(
        Group::at(stage.position.x, stage.position.y)
            .opacity(progress)
            .child(
                Circle::new(0.0, 0.0, stage.size * progress / 2.0)
                    .fill(stage.color)
                    .stroke(Stroke::new(Color::WHITE, 3.0)),
            )
            .child(Text::new(0.0, 0.0, stage.icon, 24.0).centered().dy(-5.0))
            .child(
                Text::new(0.0, 0.0, stage.label, 11.0)
                    .bold()
                    .centered()
                    .dy(15.0),
            )
            .into(),
    )
}

/// Connector grown to `progress`; the head appears past the halfway mark.
pub fn connector_node(c: &Connector, progress: f64) -> Option<Node> {
    if progress <= 0.0 {
        return None;
    }
    let end = c.from.lerp(c.to, progress);
    let mut g = Group::new().child(
        Line::new(c.from.x, c.from.y, end.x, end.y).stroke(Stroke::new(TEAL, 3.0).round()),
    );
    if progress > 0.5 {
        g = g.child(
            Polygon::new([
                end,
                Point::new(end.x - 10.0, end.y - 5.0),
                Point::new(end.x - 10.0, end.y + 5.0),
            ])
            .fill(TEAL),
        );
    }
    Some(g.into())
}

/// Relevance score printed under document `rank`.
pub fn score(rank: u32) -> f64 {
    0.9 - f64::from(rank) * 0.1
}

/// Ranked document card sliding down to its row; the score shows past the halfway mark.
pub fn document(rank: u32, x: f64, progress: f64) -> Option<Node> {
    if progress <= 0.0 {
        return None;
    }
    let offset = f64::from(rank.saturating_sub(1)) * DOC_ROW_STEP;
    let mut g = Group::at(x, offset * progress)
        .opacity(progress)
        .child(
            Rect::new(-25.0, -15.0, 50.0, 30.0)
                .rounded(3.0)
                .fill(Color::hex(0x2d3748))
                .stroke(Stroke::new(TEAL, 1.0)),
        )
        .child(
            Text::new(0.0, 0.0, format!("Doc{rank}"), 12.0)
                .bold()
                .centered()
                .fill(TEAL),
        );
    if progress > 0.5 {
        g = g.child(
            Text::new(0.0, 22.0, format!("Score: {:.2}", score(rank)), 9.0)
                .centered()
                .fill(MUTED),
        );
    }
    Some(g.into())
}

fn heading(x: f64, y: f64, content: &str, size: f64) -> Text {
    Text::new(x, y, content, size)
        .bold()
        .anchor(TextAnchor::Middle)
}

fn legend() -> [Node; 4] {
    [
        Circle::new(50.0, 550.0, 8.0).fill(TEAL).filter("glow").into(),
        Text::new(70.0, 555.0, "活跃节点", 10.0).fill(MUTED).into(),
        Circle::new(180.0, 550.0, 8.0).fill(MUTED).into(),
        Text::new(200.0, 555.0, "待激活", 10.0).fill(MUTED).into(),
    ]
}

/// The RerankingFlow scene.
#[derive(Clone, Debug)]
pub struct RerankingFlow {
    spec: SceneSpec,
}

impl RerankingFlow {
    /// Scene for `spec`.
    pub fn new(spec: SceneSpec) -> FrameloomResult<Self> {
        spec.validate()?;
        Ok(Self { spec })
    }

    /// Default registration: 1280×720 at 30 fps for 600 frames.
    pub fn default_spec() -> SceneSpec {
        SceneSpec::hd30(ID, DURATION_FRAMES)
    }

    fn row(
        &self,
        frame: FrameIndex,
        stages: &[Stage],
        connectors: &[Connector],
    ) -> FrameloomResult<Vec<Node>> {
        let fps = self.spec.fps;
        let mut nodes = Vec::new();
        // Paint order follows the row: stage, arrow, stage, ...
        for (i, s) in stages.iter().enumerate() {
            nodes.extend(stage_node(
                s,
                spring_progress(frame, s.delay, fps, STAGE_SPRING_FRAMES),
            ));
            if let Some(c) = connectors.get(i) {
                nodes.extend(connector_node(c, connector_progress(frame, c.delay)?));
            }
        }
        Ok(nodes)
    }
}

impl SceneSource for RerankingFlow {
    fn spec(&self) -> &SceneSpec {
        &self.spec
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn sample(&self, frame: FrameIndex) -> FrameloomResult<Scene> {
        let fps = self.spec.fps;
        let mut scene = self
            .spec
            .blank()
            .with_view_box(VIEW_W, VIEW_H)
            .with_background(Paint::gradient("backdrop"));
        scene.def(Def::LinearGradient {
            id: "backdrop".into(),
            from: Point::new(0.0, 0.0),
            to: Point::new(1.0, 1.0),
            stops: vec![
                GradientStop::new(0.0, Color::hex(0x1a1a2e)),
                GradientStop::new(1.0, Color::hex(0x16213e)),
            ],
        });
        scene.def(Def::Glow {
            id: "glow".into(),
            std_dev: 3.0,
        });

        scene.push(heading(
            450.0,
            35.0,
            "检索与重排流程 (Retrieval & Reranking Pipeline)",
            20.0,
        ));

        scene.push(
            Group::at(0.0, 60.0)
                .children(self.row(frame, &PIPELINE, &PIPELINE_CONNECTORS)?)
                .child(
                    Text::new(490.0, 135.0, "(1000+ 文档)", 10.0)
                        .anchor(TextAnchor::Middle)
                        .fill(MUTED),
                ),
        );

        scene.push(
            Group::at(0.0, 220.0)
                .child(heading(450.0, 0.0, "重排阶段详情 (Reranking Stages)", 16.0))
                .children(self.row(frame, &RERANKERS, &RERANKER_CONNECTORS)?),
        );

        let docs = (1..=TOP_K).filter_map(|rank| {
            let i = f64::from(rank - 1);
            let progress =
                spring_progress(frame, DOC_DELAY + i * DOC_STAGGER, fps, DOC_SPRING_FRAMES);
            document(rank, i * DOC_SPACING, progress)
        });
        scene.push(
            Group::at(200.0, 420.0)
                .child(heading(250.0, -50.0, "最终排序结果 (Top-K Results)", 14.0))
                .children(docs),
        );

        scene.push(
            Group::at(100.0, 530.0).child(
                Text::new(700.0, 0.0, format!("Frame: {} | 流程循环演示", frame.0), 11.0)
                    .anchor(TextAnchor::Middle)
                    .fill(Color::hex(0x666666)),
            ),
        );
        scene.extend(legend());
        Ok(scene)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/reranking_flow.rs"]
mod tests;
