//! A headless [`Driver`] that replays a fixed list of messages and keeps
//! every flushed [`Frame`].

use std::collections::VecDeque;
use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::app::{Context, Driver};
use crate::grid::Frame;
use crate::messages::Msg;

/// Replays one scripted message per poll.
///
/// Once the script is exhausted, zero-timeout polls (the mid-step drains)
/// report nothing and the next waiting poll reports [`Msg::Quit`].
#[derive(Debug, Default)]
pub struct ScriptDriver {
    script: VecDeque<Msg>,
    frames: Vec<Frame>,
    closed: bool,
}

impl ScriptDriver {
    pub fn new(script: impl IntoIterator<Item = Msg>) -> Self {
        Self {
            script: script.into_iter().collect(),
            frames: Vec::new(),
            closed: false,
        }
    }

    /// Every frame flushed so far, oldest first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Messages not yet delivered.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Driver for ScriptDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.closed = false;
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        timeout: Duration,
        tx: &Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if ctx.is_done() {
            return Ok(());
        }
        let msg = match self.script.pop_front() {
            Some(msg) => msg,
            None if timeout.is_zero() => return Ok(()),
            None => Msg::Quit,
        };
        tx.send(msg)?;
        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        self.frames.push(frame);
        Ok(())
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
