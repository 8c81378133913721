// Copyright 2025 the Inscribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `LayerStack`: activity of the topmost layer, ids, and hit testing.

use inscribe_layer::{FixedAdvanceMeasurer, LayerStack, SizeLimits, TextLayer, TextStyle};
use kurbo::{Point, Rect};

const M: FixedAdvanceMeasurer = FixedAdvanceMeasurer::new(0.5, 1.0);

fn text_layer(text: &str, at: Point) -> TextLayer {
    let mut l = TextLayer::new(TextStyle::with_size(20.0), SizeLimits::new(5.0, 80.0), 0.0);
    l.set_text(Some(text), &M);
    l.set_position(at);
    l
}

#[test]
fn empty_stack_has_no_active_layer() {
    let mut stack = LayerStack::new();
    assert!(stack.is_empty());
    assert!(stack.active().is_none());
    assert!(stack.active_mut().is_none());
    assert!(stack.pop().is_none());
    assert!(!stack.raise(0));
}

#[test]
fn only_the_top_layer_is_mutated() {
    let mut stack = LayerStack::new();
    let a = stack.push(text_layer("A", Point::ZERO));
    let b = stack.push(text_layer("B", Point::ZERO));
    assert_ne!(a, b);
    assert_eq!(stack.active_id(), Some(b));

    let top = stack.active_mut().unwrap();
    top.apply_pan(10.0, 20.0);
    top.apply_scale_factor(2.0, &M);
    top.apply_rotation_delta(15.0, Point::new(1.0, 1.0));

    let layer_a = stack.find(a).unwrap();
    assert_eq!(layer_a.position(), Point::ZERO);
    assert_eq!(layer_a.scale(), 1.0);
    assert_eq!(layer_a.rotation_degrees(), 0.0);

    let layer_b = stack.find(b).unwrap();
    assert_eq!(layer_b.position(), Point::new(10.0, 20.0));
    assert_eq!(layer_b.scale(), 2.0);
    assert_eq!(layer_b.rotation_degrees(), 15.0);

    let (popped, _) = stack.pop().unwrap();
    assert_eq!(popped, b);
    assert_eq!(stack.active_id(), Some(a));
    assert_eq!(stack.active().unwrap().lines(), &["A"]);
}

#[test]
fn ids_are_not_reused_after_clear() {
    let mut stack = LayerStack::new();
    let a = stack.push(text_layer("A", Point::ZERO));
    stack.clear();
    let b = stack.push(text_layer("B", Point::ZERO));
    assert!(b > a);
    assert_eq!(stack.len(), 1);
}

#[test]
fn hit_test_prefers_topmost_and_raise_reorders() {
    let image = Rect::new(0.0, 0.0, 400.0, 400.0);
    let mut stack = LayerStack::new();
    let low = stack.push(text_layer("wide text", Point::new(0.0, 0.0)));
    let high = stack.push(text_layer("xy", Point::new(10.0, 0.0)));

    // Overlap: the top layer wins.
    assert_eq!(stack.hit_test(Point::new(15.0, 5.0), image), Some(1));
    // Only the bottom layer covers this point.
    assert_eq!(stack.hit_test(Point::new(60.0, 5.0), image), Some(0));
    assert_eq!(stack.hit_test(Point::new(300.0, 300.0), image), None);

    assert!(stack.raise(0));
    assert_eq!(stack.active_id(), Some(low));
    let order: Vec<_> = stack.iter().map(|(id, _)| id).collect();
    assert_eq!(order, vec![high, low]);
}

#[test]
fn remove_by_id() {
    let mut stack = LayerStack::new();
    let a = stack.push(text_layer("A", Point::ZERO));
    let b = stack.push(text_layer("B", Point::ZERO));
    assert!(stack.remove(a).is_some());
    assert!(stack.remove(a).is_none());
    assert_eq!(stack.active_id(), Some(b));
    assert_eq!(stack.len(), 1);
}

#[test]
fn find_mut_reaches_layers_below_the_top() {
    let mut stack = LayerStack::new();
    let a = stack.push(text_layer("A", Point::ZERO));
    let b = stack.push(text_layer("B", Point::ZERO));
    stack.find_mut(a).unwrap().apply_pan(5.0, 6.0);
    assert_eq!(stack.find(a).unwrap().position(), Point::new(5.0, 6.0));
    assert_eq!(stack.find(b).unwrap().position(), Point::ZERO);

    stack.remove(a);
    assert!(stack.find_mut(a).is_none());
}
