//! Playthroughs of the Day 1 story in each of its encodings.

use story_engine::{PlayConfig, SessionError, SessionStatus, StoryClock, TraversalSession};
use story_graph::formats::{self, ContentFormat, StoryDocument};
use story_graph::StoryGraph;

const DAY_ONE_JSON: &str = include_str!("fixtures/day_one.json");
const DAY_ONE_TUPLES: &str = include_str!("fixtures/day_one_tuples.json");
const DAY_ONE_MARKUP: &str = include_str!("fixtures/day_one.mmd");
const PLAY_TOML: &str = include_str!("fixtures/play.toml");

fn day_one() -> StoryGraph {
    StoryDocument::from_json(DAY_ONE_JSON)
        .unwrap()
        .into_graph()
        .unwrap()
}

fn play<'g>(graph: &'g StoryGraph, labels: &[&str]) -> TraversalSession<'g> {
    let mut session = TraversalSession::new(graph);
    for label in labels {
        session.advance(label).unwrap();
    }
    session
}

#[test]
fn test_day_one_graph_is_valid() {
    let graph = day_one();

    assert_eq!(graph.start_node().as_str(), "N1");
    assert_eq!(graph.node_count(), 28);
    assert_eq!(graph.edge_count(), 60);
    assert_eq!(graph.death_nodes().len(), 7);
    assert_eq!(graph.end_nodes().len(), 1);
    assert!(graph.unreachable_nodes().is_empty());
}

#[test]
fn test_greeting_the_family_is_fatal() {
    let graph = day_one();
    let session = play(&graph, &["直接开门", "打招呼"]);

    assert_eq!(session.current_node().as_str(), "DEAD1");
    assert_eq!(session.status(), SessionStatus::Dead);
    assert_eq!(session.elapsed_time(), 20);
}

#[test]
fn test_living_room_route_survives_the_night() {
    let graph = day_one();
    let session = play(&graph, &["直接开门", "继续走", "进入客厅", "关灯返回卧室"]);

    assert_eq!(session.current_node().as_str(), "DAY2");
    assert_eq!(session.status(), SessionStatus::Completed);
    assert_eq!(session.elapsed_time(), 10 + 20 + 30 + 30);
}

#[test]
fn test_elapsed_time_is_sum_of_edge_costs() {
    let graph = day_one();
    let labels = ["直接开门", "继续走", "进入客厅", "客厅电视亮起", "回卧室休息"];
    let session = play(&graph, &labels);

    let mut at = graph.start_node().clone();
    let mut expected = 0;
    for label in labels {
        let edge = graph.edge(at.as_str(), label).unwrap();
        expected += u64::from(edge.time_cost);
        at = edge.to.clone();
    }

    assert_eq!(expected, 110);
    assert_eq!(session.elapsed_time(), expected);
    assert_eq!(session.status(), SessionStatus::Completed);
}

#[test]
fn test_same_choices_give_same_states() {
    let graph = day_one();
    let labels = ["看纸条1", "丢掉纸条", "捡起来看", "藏进口袋", "继续等待", "困意袭来 睡着"];
    let mut first = TraversalSession::new(&graph);
    let mut second = TraversalSession::new(&graph);

    for label in labels {
        first.advance(label).unwrap();
        second.advance(label).unwrap();
        assert_eq!(
            (first.current_node(), first.elapsed_time(), first.status()),
            (second.current_node(), second.elapsed_time(), second.status())
        );
    }
    assert_eq!(first.status(), SessionStatus::Completed);
    assert_eq!(first.visit_count("N2"), 2);
}

#[test]
fn test_looping_back_to_the_bedroom() {
    let graph = day_one();
    let session = play(&graph, &["直接开门", "回卧室", "直接开门", "回卧室"]);

    assert_eq!(session.current_node().as_str(), "N1");
    assert_eq!(session.visit_count("N1"), 3);
    assert_eq!(session.steps_taken(), 4);
    assert_eq!(session.elapsed_time(), 30);
    assert_eq!(session.status(), SessionStatus::InProgress);
}

#[test]
fn test_terminal_session_rejects_everything_until_reset() {
    let graph = day_one();
    let mut session = play(&graph, &["观察房间", "盯镜子", "继续凝视"]);
    assert_eq!(session.status(), SessionStatus::Dead);

    assert_eq!(
        session.advance("闭眼转身").unwrap_err(),
        SessionError::SessionTerminated(SessionStatus::Dead)
    );

    session.reset();
    assert_eq!(session.current_node().as_str(), "N1");
    assert_eq!(session.choices().unwrap().len(), 3);
}

#[test]
fn test_all_encodings_describe_the_same_graph() {
    let options = PlayConfig::from_toml_str(PLAY_TOML)
        .unwrap()
        .content
        .markup_options();
    let mapping = day_one();
    let tuples = formats::load(DAY_ONE_TUPLES, ContentFormat::Tuples, &options).unwrap();
    let markup = formats::load(DAY_ONE_MARKUP, ContentFormat::Markup, &options).unwrap();

    for other in [&tuples, &markup] {
        assert_eq!(other.title(), mapping.title());
        assert_eq!(other.start_node(), mapping.start_node());

        let nodes: Vec<_> = other.nodes().collect();
        let expected: Vec<_> = mapping.nodes().collect();
        assert_eq!(nodes, expected);

        let edges: Vec<_> = other
            .edges()
            .iter()
            .map(|e| (&e.from, e.label.as_str(), &e.to))
            .collect();
        let expected: Vec<_> = mapping
            .edges()
            .iter()
            .map(|e| (&e.from, e.label.as_str(), &e.to))
            .collect();
        assert_eq!(edges, expected);
    }

    // Only the mapping form carries time costs.
    assert!(markup.edges().iter().all(|e| e.time_cost == 0));
    let session = play(&markup, &["直接开门", "打招呼"]);
    assert_eq!(session.status(), SessionStatus::Dead);
    assert_eq!(session.elapsed_time(), 0);
}

#[test]
fn test_snapshot_survives_a_save_and_load() {
    let graph = day_one();
    let session = play(&graph, &["看纸条1", "背下规则", "去厨房"]);
    let saved = session.snapshot().to_json().unwrap();

    let snapshot = story_engine::SessionSnapshot::from_json(&saved).unwrap();
    let mut resumed = TraversalSession::resume(&graph, &snapshot).unwrap();
    assert_eq!(resumed.id(), session.id());
    assert_eq!(resumed.current_node().as_str(), "N12");
    assert_eq!(resumed.elapsed_time(), 15 + 25 + 25);

    resumed.advance("坐下").unwrap();
    resumed.advance("食物变腐烂").unwrap();
    assert_eq!(resumed.status(), SessionStatus::Dead);
}

#[test]
fn test_clock_from_config() {
    let config = PlayConfig::from_toml_str(PLAY_TOML).unwrap();
    assert_eq!(config.clock, StoryClock::default());

    let graph = day_one();
    let session = play(&graph, &["直接开门", "继续走", "进入客厅", "客厅电视亮起", "回卧室休息"]);
    assert_eq!(session.clock_time(&config.clock).to_string(), "Day 1 23:50");
}

#[test]
fn test_graph_shared_across_threads() {
    let graph = day_one();

    std::thread::scope(|scope| {
        let handles: Vec<_> = [
            vec!["直接开门", "打招呼"],
            vec!["直接开门", "继续走", "进入客厅", "关灯返回卧室"],
        ]
        .into_iter()
        .map(|labels| {
            let graph = &graph;
            scope.spawn(move || play(graph, &labels).status())
        })
        .collect();

        let statuses: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(statuses, vec![SessionStatus::Dead, SessionStatus::Completed]);
    });
}
