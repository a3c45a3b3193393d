// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drives one full shared-element transition against a scripted stage.
//!
//! A gallery card is swapped for a detail page; the card's image and the
//! detail header image share the identity tag `"hero"`, so a clone carries
//! the image from its small box to its large one while the two views
//! cross-fade. Every effect the state machine emits is printed as the host
//! applies it. A real host would wire `RequestFrame` to its compositor and
//! `clone_finished` to its animation-end events; this demo answers both
//! inline.

use std::collections::HashMap;

use kurbo::Rect;
use stagehand_transition::{CloneId, Effect, IdentityTag, Phase, Stage, TransitionGroup};

const CONTAINER: u32 = 0;
const CARD_VIEW: u32 = 1;
const DETAIL_VIEW: u32 = 2;
const CARD_IMAGE: u32 = 10;
const DETAIL_IMAGE: u32 = 20;

/// A frozen snapshot of the rendered scene: which elements carry the shared
/// tag, and where layout put everything.
struct DemoStage {
    tagged: HashMap<u32, Vec<(u32, IdentityTag)>>,
    rects: HashMap<u32, Rect>,
}

impl DemoStage {
    fn new() -> Self {
        let mut tagged: HashMap<u32, Vec<(u32, IdentityTag)>> = HashMap::new();
        tagged.insert(CARD_VIEW, vec![(CARD_IMAGE, "hero".into())]);
        tagged.insert(DETAIL_VIEW, vec![(DETAIL_IMAGE, "hero".into())]);

        let mut rects = HashMap::new();
        rects.insert(CARD_IMAGE, Rect::new(16.0, 120.0, 176.0, 220.0));
        rects.insert(DETAIL_IMAGE, Rect::new(0.0, 0.0, 360.0, 240.0));

        Self { tagged, rects }
    }
}

impl Stage for DemoStage {
    type Node = u32;

    fn tagged_descendants(&self, root: u32) -> Vec<(u32, IdentityTag)> {
        self.tagged.get(&root).cloned().unwrap_or_default()
    }

    fn bounding_rect(&self, node: u32) -> Rect {
        self.rects.get(&node).copied().unwrap_or(Rect::ZERO)
    }
}

struct Host {
    group: TransitionGroup<&'static str, &'static str, u32>,
    spawned: Vec<CloneId>,
}

impl Host {
    fn dispatch(&mut self, effects: Vec<Effect<u32>>) {
        for effect in effects {
            match effect {
                Effect::SpawnClone {
                    clone,
                    source,
                    parent,
                    frame,
                    duration_ms,
                } => {
                    println!(
                        "  spawn {clone:?}: clone of element {source} in container {parent} at {frame:?}, {duration_ms}ms transition"
                    );
                    self.spawned.push(clone);
                }
                Effect::RequestFrame => {
                    println!("  frame requested; compositor commits and answers");
                    let next = self.group.frame();
                    self.dispatch(next);
                }
                Effect::ApplyTransform { clone, transform } => {
                    println!(
                        "  play {clone:?}: translate({}, {}) scale({}, {})",
                        transform.translate_x,
                        transform.translate_y,
                        transform.scale_x,
                        transform.scale_y,
                    );
                }
                Effect::RemoveClone { clone } => println!("  remove {clone:?}"),
                Effect::ScheduleStallTimeout { session, delay_ms } => {
                    println!("  stall timeout armed for {session:?} in {delay_ms}ms");
                }
                Effect::Invalidate => self.render(),
            }
        }
    }

    fn render(&self) {
        let children: Vec<String> = self
            .group
            .children()
            .map(|entry| format!("{}[{:?}]", entry.key(), entry.role))
            .collect();
        println!(
            "  render: children {:?}, outgoing shown: {}, incoming shown: {}",
            children,
            self.group.outgoing_visible(),
            self.group.incoming_visible(),
        );
    }
}

fn main() {
    let stage = DemoStage::new();
    let mut host = Host {
        group: TransitionGroup::new([("card", "gallery card")]),
        spawned: Vec::new(),
    };
    host.group.set_container(CONTAINER);

    println!("swap: card -> detail");
    let effects = host.group.update([("detail", "detail page")]);
    host.dispatch(effects);
    assert_eq!(host.group.phase(), Phase::Pending);

    println!("mount: both views render, roots report in");
    host.group.outgoing_mounted(CARD_VIEW);
    host.group.incoming_mounted(DETAIL_VIEW);

    println!("capture: matching, sampling, cloning");
    let effects = host.group.capture(&stage);
    host.dispatch(effects);

    println!("complete: clone transitions end");
    for clone in host.spawned.clone() {
        let effects = host.group.clone_finished(clone);
        host.dispatch(effects);
    }

    assert_eq!(host.group.phase(), Phase::Idle);
    println!("settled.");
}
