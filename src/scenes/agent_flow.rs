//! Coordinator and specialist agents lighting up over a three-phase cycle.
//!
//! Every visual is gated by its own delay. Agents, links and gates that belong to a phase other
//! than the current one are released far in the past and therefore drawn fully settled.

use crate::animation::ease::linear_clamp;
use crate::animation::spring::spring_progress;
use crate::foundation::core::{FrameIndex, Point};
use crate::foundation::error::FrameloomResult;
use crate::scene::graph::{
    Circle, Color, Def, GradientStop, Group, Line, Node, Paint, Polygon, Rect, Scene, Stroke,
    Styled, Text, TextAnchor,
};
use crate::scene::{SceneSource, SceneSpec};

/// Registry id.
pub const ID: &str = "AgentCollaborationFlow";
/// Registered length; also the length of one full phase cycle.
pub const DURATION_FRAMES: u64 = 600;
/// Frames per phase.
pub const PHASE_FRAMES: u64 = DURATION_FRAMES / 3;
/// Delay used for entities outside the current phase.
pub const INACTIVE_DELAY: f64 = -1000.0;

const VIEW_W: f64 = 1200.0;
const VIEW_H: f64 = 700.0;

const AGENT_SPRING_FRAMES: f64 = 30.0;
const PHASE_SPRING_FRAMES: f64 = 20.0;
const GATE_SPRING_FRAMES: f64 = 25.0;
const ARROW_RAMP_FRAMES: f64 = 20.0;

const GOLD: Color = Color::hex(0xffd700);
const MUTED: Color = Color::hex(0x888888);

/// Stage of the collaboration cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Agents scan and analyze the project.
    Analysis,
    /// Specialists refactor and optimize.
    Optimization,
    /// Results are verified.
    Execution,
}

impl Phase {
    /// Phases in cycle order.
    pub const ALL: [Self; 3] = [Self::Analysis, Self::Optimization, Self::Execution];

    /// Phase active at `frame`: `(frame mod 600) / 200`.
    pub fn at(frame: FrameIndex) -> Self {
        Self::ALL[((frame.0 % DURATION_FRAMES) / PHASE_FRAMES) as usize]
    }

    /// Indicator label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Analysis => "分析阶段",
            Self::Optimization => "优化阶段",
            Self::Execution => "执行阶段",
        }
    }

    fn short(self) -> &'static str {
        match self {
            Self::Analysis => "分析",
            Self::Optimization => "优化",
            Self::Execution => "执行",
        }
    }
}

/// Release delay of an entity scheduled for `phase` at `delay` frames.
///
/// Entities without a phase always use `delay`.
pub fn phase_delay(current: Phase, phase: Option<Phase>, delay: f64) -> f64 {
    match phase {
        Some(p) if p != current => INACTIVE_DELAY,
        _ => delay,
    }
}

/// Role of an agent; selects its outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    /// The orchestrator at the top.
    Coordinator,
    /// Scanners and analyzers.
    Analysis,
    /// Refactoring and performance specialists.
    Execution,
    /// Test agent.
    Verification,
}

impl Layer {
    fn outline(self) -> (Color, f64) {
        match self {
            Self::Coordinator => (GOLD, 4.0),
            Self::Analysis => (Color::WHITE, 3.0),
            Self::Execution => (Color::hex(0xff6b6b), 3.0),
            Self::Verification => (Color::hex(0x00b894), 3.0),
        }
    }
}

/// Immutable agent descriptor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentNode {
    /// Center.
    pub position: Point,
    /// Name under the icon.
    pub label: &'static str,
    /// Emoji icon.
    pub icon: &'static str,
    /// Fill color.
    pub color: Color,
    /// Role.
    pub layer: Layer,
    /// Fully grown diameter.
    pub size: f64,
    /// Phase the delay applies to; `None` is always active.
    pub phase: Option<Phase>,
    /// Release frame within its phase.
    pub delay: f64,
}

const fn agent(
    (x, y): (f64, f64),
    label: &'static str,
    icon: &'static str,
    color: u32,
    layer: Layer,
    phase: Phase,
    delay: f64,
) -> AgentNode {
    AgentNode {
        position: Point::new(x, y),
        label,
        icon,
        color: Color::hex(color),
        layer,
        size: 80.0,
        phase: Some(phase),
        delay,
    }
}

/// The coordinator followed by the seven specialists.
pub const AGENTS: [AgentNode; 8] = [
    AgentNode {
        position: Point::new(600.0, 120.0),
        label: "协调者",
        icon: "🧠",
        color: Color::hex(0x6c5ce7),
        layer: Layer::Coordinator,
        size: 100.0,
        phase: None,
        delay: 0.0,
    },
    agent((200.0, 250.0), "项目扫描器", "🔍", 0x74b9ff, Layer::Analysis, Phase::Analysis, 60.0),
    agent((400.0, 250.0), "架构分析器", "🏗️", 0x00cec9, Layer::Analysis, Phase::Analysis, 80.0),
    agent((800.0, 250.0), "业务分析器", "📊", 0xfdcb6e, Layer::Analysis, Phase::Analysis, 120.0),
    agent((1000.0, 250.0), "问题识别器", "⚠️", 0xe17055, Layer::Analysis, Phase::Analysis, 140.0),
    agent((400.0, 400.0), "重构专家", "🔄", 0xff7675, Layer::Execution, Phase::Optimization, 200.0),
    agent((800.0, 400.0), "性能优化专家", "⚡", 0xfd79a8, Layer::Execution, Phase::Optimization, 220.0),
    agent((600.0, 550.0), "测试代理", "🧪", 0x00b894, Layer::Verification, Phase::Execution, 280.0),
];

/// Directed connection drawn as a growing line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
    /// Stroke color.
    pub color: Color,
    /// Dashed links carry no arrow head.
    pub dashed: bool,
    /// Phase the delay applies to.
    pub phase: Phase,
    /// Release frame within its phase.
    pub delay: f64,
}

const fn link(to: (f64, f64), color: u32, phase: Phase, delay: f64) -> Link {
    Link {
        from: Point::new(600.0, 120.0),
        to: Point::new(to.0, to.1),
        color: Color::hex(color),
        dashed: false,
        phase,
        delay,
    }
}

const fn parallel_link(from: (f64, f64), to: (f64, f64)) -> Link {
    Link {
        from: Point::new(from.0, from.1),
        to: Point::new(to.0, to.1),
        color: Color::hex(0xaaaaaa),
        dashed: true,
        phase: Phase::Analysis,
        delay: 100.0,
    }
}

/// Coordinator fan-out followed by the dashed parallel links between analyzers.
pub const LINKS: [Link; 9] = [
    link((200.0, 250.0), 0x74b9ff, Phase::Analysis, 50.0),
    link((400.0, 250.0), 0x00cec9, Phase::Analysis, 70.0),
    link((800.0, 250.0), 0xfdcb6e, Phase::Analysis, 110.0),
    link((1000.0, 250.0), 0xe17055, Phase::Analysis, 130.0),
    link((400.0, 400.0), 0xff7675, Phase::Optimization, 190.0),
    link((800.0, 400.0), 0xfd79a8, Phase::Optimization, 210.0),
    link((600.0, 550.0), 0x00b894, Phase::Execution, 270.0),
    parallel_link((200.0, 250.0), (800.0, 250.0)),
    parallel_link((400.0, 250.0), (1000.0, 250.0)),
];

/// Human review checkpoints: position, phase and delay.
pub const REVIEW_GATES: [(Point, Phase, f64); 2] = [
    (Point::new(600.0, 325.0), Phase::Analysis, 180.0),
    (Point::new(600.0, 475.0), Phase::Optimization, 260.0),
];

/// Agent drawn at spring `progress`; `None` before release.
pub fn agent_node(agent: &AgentNode, progress: f64) -> Option<Node> {
    if progress <= 0.0 {
        return None;
    }
    let r = agent.size * progress / 2.0;
    let (outline, width) = agent.layer.outline();
    let mut g = Group::at(agent.position.x, agent.position.y)
        .opacity(progress)
        .child(
            Circle::new(0.0, 0.0, r)
                .fill(agent.color)
                .stroke(Stroke::new(outline, width)),
        )
        .child(Text::new(0.0, 0.0, agent.icon, 24.0).centered().dy(-5.0))
        .child(
            Text::new(0.0, 0.0, agent.label, 11.0)
                .bold()
                .centered()
                .dy(15.0),
        );
    if agent.layer == Layer::Coordinator {
        g = g.child(
            Circle::new(0.0, 0.0, r + 5.0)
                .fill(Paint::None)
                .stroke(Stroke::new(GOLD, 2.0).dashed(&[5.0, 5.0])),
        );
    }
    Some(g.into())
}

/// Link grown to `progress` along its length; the head appears past the halfway mark.
pub fn arrow(link: &Link, progress: f64) -> Option<Node> {
    if progress <= 0.0 {
        return None;
    }
    let end = link.from.lerp(link.to, progress);
    let mut stroke = Stroke::new(link.color, 3.0).round();
    if link.dashed {
        stroke = stroke.dashed(&[5.0, 5.0]);
    }
    let mut g =
        Group::new().child(Line::new(link.from.x, link.from.y, end.x, end.y).stroke(stroke));
    if progress > 0.5 && !link.dashed {
        g = g.child(
            Polygon::new([
                end,
                Point::new(end.x - 10.0, end.y - 5.0),
                Point::new(end.x - 10.0, end.y + 5.0),
            ])
            .fill(link.color),
        );
    }
    Some(g.into())
}

fn phase_indicator(x: f64, phase: Phase, active: bool, progress: f64) -> Option<Node> {
    if progress <= 0.0 {
        return None;
    }
    let (bg, fg) = if active {
        (Color::hex(0x4ecdc4), Color::WHITE)
    } else {
        (Color::hex(0x2d3748), MUTED)
    };
    Some(
        Group::at(x, 60.0)
            .opacity(progress)
            .child(Rect::new(-60.0, -15.0, 120.0, 30.0).rounded(15.0).fill(bg))
            .child(Text::new(0.0, 0.0, phase.label(), 12.0).bold().centered().fill(fg))
            .into(),
    )
}

fn review_gate(at: Point, progress: f64) -> Option<Node> {
    if progress <= 0.0 {
        return None;
    }
    Some(
        Group::at(at.x, at.y)
            .opacity(progress)
            .child(
                Circle::new(0.0, 0.0, 25.0)
                    .fill(GOLD)
                    .stroke(Stroke::new(Color::WHITE, 2.0)),
            )
            .child(
                Text::new(0.0, 0.0, "👨‍💼", 16.0)
                    .bold()
                    .centered()
                    .fill(Color::BLACK),
            )
            .child(Text::new(0.0, 0.0, "审核", 10.0).centered().dy(35.0).fill(GOLD))
            .into(),
    )
}

fn legend() -> Node {
    let entries = [
        (0x6c5ce7, GOLD, "协调者"),
        (0x74b9ff, Color::WHITE, "分析组"),
        (0xff7675, Color::WHITE, "执行组"),
        (0x00b894, Color::WHITE, "验证组"),
        (0xffd700, Color::WHITE, "人工审核"),
    ];
    let mut g = Group::at(950.0, 620.0);
    for (i, (fill, outline, label)) in entries.into_iter().enumerate() {
        let y = i as f64 * 25.0;
        g = g
            .child(
                Circle::new(0.0, y, 8.0)
                    .fill(Color::hex(fill))
                    .stroke(Stroke::new(outline, 2.0)),
            )
            .child(Text::new(15.0, y + 5.0, label, 10.0).fill(MUTED));
    }
    g.into()
}

/// The AgentCollaborationFlow scene.
#[derive(Clone, Debug)]
pub struct AgentCollaborationFlow {
    spec: SceneSpec,
}

impl AgentCollaborationFlow {
    /// Scene for `spec`.
    pub fn new(spec: SceneSpec) -> FrameloomResult<Self> {
        spec.validate()?;
        Ok(Self { spec })
    }

    /// Default registration: 1280×720 at 30 fps for 600 frames.
    pub fn default_spec() -> SceneSpec {
        SceneSpec::hd30(ID, DURATION_FRAMES)
    }
}

impl SceneSource for AgentCollaborationFlow {
    fn spec(&self) -> &SceneSpec {
        &self.spec
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn sample(&self, frame: FrameIndex) -> FrameloomResult<Scene> {
        let phase = Phase::at(frame);
        let fps = self.spec.fps;
        let spring_at = |delay: f64, span: f64| spring_progress(frame, delay, fps, span);

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

        scene.push(
            Text::new(
                600.0,
                35.0,
                "Agent 协作框架 - 7+1 模型 (Agent Collaboration Framework)",
                24.0,
            )
            .bold()
            .anchor(TextAnchor::Middle),
        );

        for (i, p) in Phase::ALL.into_iter().enumerate() {
            let x = 300.0 * (i as f64 + 1.0);
            let progress = spring_at(i as f64 * 20.0, PHASE_SPRING_FRAMES);
            scene.extend(phase_indicator(x, p, p == phase, progress));
        }

        for a in &AGENTS {
            let delay = phase_delay(phase, a.phase, a.delay);
            scene.extend(agent_node(a, spring_at(delay, AGENT_SPRING_FRAMES)));
        }

        for l in &LINKS {
            let delay = phase_delay(phase, Some(l.phase), l.delay);
            let progress = linear_clamp(frame.0 as f64, delay, ARROW_RAMP_FRAMES, (0.0, 1.0));
            scene.extend(arrow(l, progress));
        }

        for &(at, p, delay) in &REVIEW_GATES {
            let delay = phase_delay(phase, Some(p), delay);
            scene.extend(review_gate(at, spring_at(delay, GATE_SPRING_FRAMES)));
        }

        scene.push(
            Text::new(
                50.0,
                650.0,
                format!("当前帧: {} | 阶段: {}", frame.0, phase.short()),
                12.0,
            )
            .fill(MUTED),
        );
        scene.push(legend());
        Ok(scene)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/agent_flow.rs"]
mod tests;
