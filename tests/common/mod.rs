//! Shared fixtures: a two-field record store and a pair of counters.

#![allow(dead_code, unused_imports)]

use std::cell::RefCell;
use std::rc::Rc;

use tessera::{Listener, Update};

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: i64,
    pub y: String,
}

pub fn initial_point() -> Point {
    Point {
        x: 100,
        y: "y".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PointAction {
    SetX(i64),
    SetY(String),
}

pub fn point_update(state: Point, action: &PointAction) -> Point {
    match action {
        PointAction::SetX(x) => Point { x: *x, ..state },
        PointAction::SetY(y) => Point {
            y: y.clone(),
            ..state
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterAction {
    Increment,
    Decrement,
}

pub fn increment(state: i64, action: &CounterAction) -> i64 {
    match action {
        CounterAction::Increment => state + 1,
        CounterAction::Decrement => state,
    }
}

pub fn decrement(state: i64, action: &CounterAction) -> i64 {
    match action {
        CounterAction::Increment => state,
        CounterAction::Decrement => state - 1,
    }
}

pub fn counter_update() -> Update<i64, CounterAction> {
    Update::join([Update::new(increment), Update::new(decrement)])
}

/// Listener that appends every state it sees to a shared log.
pub fn recording<S: Clone + 'static>() -> (Listener<S>, Rc<RefCell<Vec<S>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let listener = Listener::infallible(move |state: &S| log.borrow_mut().push(state.clone()));
    (listener, seen)
}

/// Listener that appends `tag` to a shared log, for ordering checks.
pub fn tagged(tag: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Listener<i64> {
    let log = Rc::clone(log);
    Listener::infallible(move |_: &i64| log.borrow_mut().push(tag))
}
