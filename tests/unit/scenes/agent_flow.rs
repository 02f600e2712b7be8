use super::*;

fn texts(nodes: &[Node], out: &mut Vec<String>) {
    for n in nodes {
        match n {
            Node::Group(g) => texts(&g.children, out),
            Node::Text(t) => out.push(t.content.clone()),
            _ => {}
        }
    }
}

fn labels_at(frame: u64) -> Vec<String> {
    let scene = AgentCollaborationFlow::new(AgentCollaborationFlow::default_spec())
        .unwrap()
        .sample(FrameIndex(frame))
        .unwrap();
    let mut out = Vec::new();
    texts(&scene.nodes, &mut out);
    out
}

#[test]
fn phases_cycle_every_six_hundred_frames() {
    assert_eq!(Phase::at(FrameIndex(0)), Phase::Analysis);
    assert_eq!(Phase::at(FrameIndex(199)), Phase::Analysis);
    assert_eq!(Phase::at(FrameIndex(200)), Phase::Optimization);
    assert_eq!(Phase::at(FrameIndex(450)), Phase::Execution);
    assert_eq!(Phase::at(FrameIndex(600)), Phase::Analysis);
}

#[test]
fn inactive_phases_release_in_the_past() {
    assert_eq!(phase_delay(Phase::Analysis, Some(Phase::Analysis), 60.0), 60.0);
    assert_eq!(
        phase_delay(Phase::Analysis, Some(Phase::Execution), 280.0),
        INACTIVE_DELAY
    );
    assert_eq!(phase_delay(Phase::Execution, None, 0.0), 0.0);
}

#[test]
fn entities_before_their_delay_draw_nothing() {
    let at_30 = labels_at(30);
    assert!(!at_30.iter().any(|s| s == "项目扫描器"));
    assert!(at_30.iter().any(|s| s == "协调者"));
    assert!(at_30.iter().any(|s| s == "重构专家"));
    assert!(at_30.iter().any(|s| s == "测试代理"));
    assert!(at_30.iter().any(|s| s == "当前帧: 30 | 阶段: 分析"));

    let at_0 = labels_at(0);
    assert!(!at_0.iter().any(|s| s == "协调者"));
    assert!(!at_0.iter().any(|s| s == "分析阶段"));

    let at_70 = labels_at(70);
    assert!(at_70.iter().any(|s| s == "项目扫描器"));
    assert!(!at_70.iter().any(|s| s == "架构分析器"));
}

#[test]
fn agent_grows_with_progress() {
    let coordinator = &AGENTS[0];
    assert!(agent_node(coordinator, 0.0).is_none());
    let Some(Node::Group(g)) = agent_node(coordinator, 1.0) else {
        panic!("agent is a group");
    };
    assert_eq!(g.children.len(), 4);
    let Node::Circle(body) = &g.children[0] else {
        panic!("body circle first");
    };
    assert_eq!(body.radius, 50.0);

    let Some(Node::Group(plain)) = agent_node(&AGENTS[1], 0.5) else {
        panic!("agent is a group");
    };
    assert_eq!(plain.children.len(), 3);
    assert_eq!(plain.opacity, 0.5);
}

#[test]
fn arrows_grow_and_gain_heads() {
    let l = &LINKS[0];
    assert!(arrow(l, 0.0).is_none());

    let Some(Node::Group(early)) = arrow(l, 0.4) else {
        panic!("arrow is a group");
    };
    assert_eq!(early.children.len(), 1);
    let Node::Line(line) = &early.children[0] else {
        panic!("line first");
    };
    assert!((line.to.x - (600.0 - 400.0 * 0.4)).abs() < 1e-9);
    assert!((line.to.y - (120.0 + 130.0 * 0.4)).abs() < 1e-9);

    let Some(Node::Group(late)) = arrow(l, 0.6) else {
        panic!("arrow is a group");
    };
    assert_eq!(late.children.len(), 2);

    let Some(Node::Group(dashed)) = arrow(&LINKS[7], 1.0) else {
        panic!("arrow is a group");
    };
    assert_eq!(dashed.children.len(), 1);
}

#[test]
fn sampling_is_deterministic() {
    let scene = AgentCollaborationFlow::new(AgentCollaborationFlow::default_spec()).unwrap();
    for f in [0, 75, 205, 599] {
        assert_eq!(
            scene.sample(FrameIndex(f)).unwrap(),
            scene.sample(FrameIndex(f)).unwrap()
        );
    }
}
