// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Spike Input Buffers
//!
//! Per-input-line ring buffers holding the spike weight scheduled for each
//! upcoming step. Slot `lag` is addressed relative to the current slice
//! origin; the event-delivery layer writes future spikes with
//! [`RingBuffer::add_value`] and moves the origin with [`RingBuffer::advance`]
//! once a slice is done.
//!
//! Synapses never hold a pointer into the collection. They keep a
//! [`BufferHandle`] validated at attach time and resolve it against the
//! `&mut SpikeBuffers` passed to every call.

use core::fmt;

use crate::types::SynapseIndex;

/// Ring of future spike weights for one input line
#[derive(Debug, Clone, PartialEq)]
pub struct RingBuffer {
    slots: Vec<f64>,
    origin: usize,
}

impl RingBuffer {
    /// Create a ring with `slots` entries (min_delay + max_delay steps in practice)
    pub fn new(slots: usize) -> Self {
        assert!(slots > 0, "RingBuffer needs at least one slot");
        Self {
            slots: vec![0.0; slots],
            origin: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline(always)]
    fn position(&self, lag: usize) -> usize {
        assert!(
            lag < self.slots.len(),
            "lag {} outside ring of {} slots",
            lag,
            self.slots.len()
        );
        (self.origin + lag) % self.slots.len()
    }

    /// Accumulate `weight` into the slot `offset` steps after the slice origin
    pub fn add_value(&mut self, offset: usize, weight: f64) {
        let pos = self.position(offset);
        self.slots[pos] += weight;
    }

    /// Read the weight scheduled at `lag` and zero the slot
    #[inline]
    pub fn get_value(&mut self, lag: usize) -> f64 {
        let pos = self.position(lag);
        core::mem::take(&mut self.slots[pos])
    }

    /// Read the weight scheduled at `lag` without consuming it
    pub fn peek(&self, lag: usize) -> f64 {
        self.slots[self.position(lag)]
    }

    /// Discard every pending spike
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = 0.0);
    }

    /// Move the slice origin forward by `steps`, zeroing the slots left behind
    pub fn advance(&mut self, steps: usize) {
        let len = self.slots.len();
        for lag in 0..steps.min(len) {
            let pos = (self.origin + lag) % len;
            self.slots[pos] = 0.0;
        }
        self.origin = (self.origin + steps) % len;
    }

    /// Sum of every pending weight
    pub fn pending(&self) -> f64 {
        self.slots.iter().sum()
    }
}

/// Resolved binding of a synapse to its entry in [`SpikeBuffers`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(usize);

impl BufferHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BufferHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Buffer({})", self.0)
    }
}

/// Externally owned collection of input buffers, indexed by synapse index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpikeBuffers {
    buffers: Vec<RingBuffer>,
}

impl SpikeBuffers {
    /// `count` input lines, each with a ring of `slots` steps
    pub fn new(count: usize, slots: usize) -> Self {
        Self {
            buffers: (0..count).map(|_| RingBuffer::new(slots)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Add one more input line and return its index
    pub fn push(&mut self, buffer: RingBuffer) -> SynapseIndex {
        self.buffers.push(buffer);
        SynapseIndex(self.buffers.len() - 1)
    }

    pub fn get(&self, index: SynapseIndex) -> Option<&RingBuffer> {
        self.buffers.get(index.0)
    }

    pub fn get_mut(&mut self, index: SynapseIndex) -> Option<&mut RingBuffer> {
        self.buffers.get_mut(index.0)
    }

    /// Validate `index` and turn it into a handle
    pub fn handle(&self, index: SynapseIndex) -> Option<BufferHandle> {
        (index.0 < self.buffers.len()).then_some(BufferHandle(index.0))
    }

    #[inline(always)]
    pub fn resolve_mut(&mut self, handle: BufferHandle) -> &mut RingBuffer {
        &mut self.buffers[handle.0]
    }

    pub fn advance_all(&mut self, steps: usize) {
        for buffer in &mut self.buffers {
            buffer.advance(steps);
        }
    }
}

/// A synapse's input line: its index plus the handle bound by `attach`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLine {
    index: SynapseIndex,
    handle: Option<BufferHandle>,
}

impl InputLine {
    pub fn new(index: SynapseIndex) -> Self {
        Self {
            index,
            handle: None,
        }
    }

    pub fn index(&self) -> SynapseIndex {
        self.index
    }

    pub fn is_attached(&self) -> bool {
        self.handle.is_some()
    }

    /// Bind to the buffer at this line's index
    ///
    /// # Panics
    /// If the collection has no entry for the index (wiring bug upstream).
    pub fn attach(&mut self, buffers: &SpikeBuffers) {
        let handle = buffers.handle(self.index).unwrap_or_else(|| {
            panic!(
                "{} has no input buffer ({} buffers attached)",
                self.index,
                buffers.len()
            )
        });
        self.handle = Some(handle);
    }

    #[inline(always)]
    fn bound(&self) -> BufferHandle {
        match self.handle {
            Some(handle) => handle,
            None => panic!("{} used before its input buffer was attached", self.index),
        }
    }

    /// Consume the spike weight scheduled at `lag`
    #[inline(always)]
    pub fn read(&self, buffers: &mut SpikeBuffers, lag: usize) -> f64 {
        buffers.resolve_mut(self.bound()).get_value(lag)
    }

    pub fn clear(&self, buffers: &mut SpikeBuffers) {
        buffers.resolve_mut(self.bound()).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_value_consumes_slot() {
        let mut ring = RingBuffer::new(4);
        ring.add_value(1, 0.5);
        ring.add_value(1, 0.25);
        assert_eq!(ring.peek(1), 0.75);
        assert_eq!(ring.get_value(1), 0.75);
        assert_eq!(ring.get_value(1), 0.0);
    }

    #[test]
    fn test_advance_moves_origin_and_wraps() {
        let mut ring = RingBuffer::new(3);
        ring.add_value(0, 9.0); // stale, dropped by advance
        ring.add_value(2, 1.0);
        ring.advance(2);
        assert_eq!(ring.peek(0), 1.0);
        // the freed slots come back as future slots
        assert_eq!(ring.peek(1), 0.0);
        assert_eq!(ring.peek(2), 0.0);
        assert_eq!(ring.pending(), 1.0);
    }

    #[test]
    fn test_clear_discards_everything() {
        let mut ring = RingBuffer::new(5);
        for lag in 0..5 {
            ring.add_value(lag, 1.0);
        }
        ring.clear();
        assert_eq!(ring.pending(), 0.0);
    }

    #[test]
    #[should_panic(expected = "outside ring")]
    fn test_lag_beyond_ring_panics() {
        let mut ring = RingBuffer::new(2);
        ring.get_value(2);
    }

    #[test]
    fn test_handle_only_for_existing_lines() {
        let buffers = SpikeBuffers::new(2, 4);
        assert!(buffers.handle(SynapseIndex(1)).is_some());
        assert!(buffers.handle(SynapseIndex(2)).is_none());
    }

    #[test]
    fn test_input_line_reads_through_handle() {
        let mut buffers = SpikeBuffers::new(3, 4);
        buffers.get_mut(SynapseIndex(2)).unwrap().add_value(0, 2.0);

        let mut line = InputLine::new(SynapseIndex(2));
        line.attach(&buffers);
        assert_eq!(line.read(&mut buffers, 0), 2.0);
        assert_eq!(line.read(&mut buffers, 0), 0.0);
    }

    #[test]
    #[should_panic(expected = "before its input buffer was attached")]
    fn test_unattached_line_panics() {
        let mut buffers = SpikeBuffers::new(1, 4);
        InputLine::new(SynapseIndex(0)).read(&mut buffers, 0);
    }

    #[test]
    #[should_panic(expected = "has no input buffer")]
    fn test_attach_out_of_range_panics() {
        let buffers = SpikeBuffers::new(1, 4);
        InputLine::new(SynapseIndex(3)).attach(&buffers);
    }
}
