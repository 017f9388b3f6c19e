//! Variable frames.
//!
//! A [`Frame`] maps variable names to slots. A slot is either declared
//! (present, holding `None`) or bound (holding a value). Frames are
//! persistent maps, so handing a snapshot to a debugger or rotating a
//! frame between the local stack and the temporary slot never copies
//! its contents.

use std::fmt;

use im::OrdMap;
use ippcode_foundation::{Error, FrameKind, Result, Value};

/// A single scope of variable slots, ordered by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    slots: OrdMap<String, Option<Value>>,
}

impl Frame {
    /// Creates an empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `name` is declared in this frame.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Number of declared variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates `(name, slot)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Option<Value>)> {
        self.slots.iter()
    }

    fn slot(&self, name: &str) -> Option<&Option<Value>> {
        self.slots.get(name)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, slot)) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match slot {
                Some(value) => write!(f, "{name} = {}", value.to_literal())?,
                None => write!(f, "{name} = <undefined>")?,
            }
        }
        write!(f, "}}")
    }
}

/// The three-level variable storage of a running program.
///
/// - one global frame that lives for the whole run
/// - a stack of local frames whose top is the active `LF`
/// - at most one pending temporary frame (`TF`)
#[derive(Clone, Debug, Default)]
pub struct FrameStore {
    global: Frame,
    locals: Vec<Frame>,
    temporary: Option<Frame>,
}

impl FrameStore {
    /// Creates a store with an empty global frame and nothing else.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the frame of the given kind.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFrame` if the local stack is empty or no
    /// temporary frame is pending.
    pub fn frame(&self, kind: FrameKind) -> Result<&Frame> {
        match kind {
            FrameKind::Global => Ok(&self.global),
            FrameKind::Local => self
                .locals
                .last()
                .ok_or_else(|| Error::invalid_frame("local frame stack is empty")),
            FrameKind::Temporary => self
                .temporary
                .as_ref()
                .ok_or_else(|| Error::invalid_frame("temporary frame is not created")),
        }
    }

    fn frame_mut(&mut self, kind: FrameKind) -> Result<&mut Frame> {
        match kind {
            FrameKind::Global => Ok(&mut self.global),
            FrameKind::Local => self
                .locals
                .last_mut()
                .ok_or_else(|| Error::invalid_frame("local frame stack is empty")),
            FrameKind::Temporary => self
                .temporary
                .as_mut()
                .ok_or_else(|| Error::invalid_frame("temporary frame is not created")),
        }
    }

    /// Returns true if `name` is declared in the frame of `kind`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFrame` if that frame does not exist.
    pub fn exists(&self, kind: FrameKind, name: &str) -> Result<bool> {
        Ok(self.frame(kind)?.contains(name))
    }

    /// Declares a new, unbound variable.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFrame` if the frame does not exist, or `Semantic`
    /// if the name is already declared there.
    pub fn declare(&mut self, kind: FrameKind, name: &str) -> Result<()> {
        let frame = self.frame_mut(kind)?;
        if frame.contains(name) {
            return Err(Error::semantic(format!(
                "variable {kind}@{name} is already declared"
            )));
        }
        frame.slots.insert(name.to_string(), None);
        Ok(())
    }

    /// Binds a value to a declared variable, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFrame` if the frame does not exist, or
    /// `UndefinedVariable` if the name was never declared.
    pub fn set(&mut self, kind: FrameKind, name: &str, value: Value) -> Result<()> {
        let frame = self.frame_mut(kind)?;
        match frame.slots.get_mut(name) {
            Some(slot) => {
                *slot = Some(value);
                Ok(())
            }
            None => Err(Error::undefined_variable(format!("{kind}@{name}"))),
        }
    }

    /// Looks up a declared variable.
    ///
    /// Returns `Ok(None)` for a declared but unbound variable; callers
    /// decide whether that is acceptable.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFrame` if the frame does not exist, or
    /// `UndefinedVariable` if the name was never declared.
    pub fn get(&self, kind: FrameKind, name: &str) -> Result<Option<&Value>> {
        self.frame(kind)?
            .slot(name)
            .map(Option::as_ref)
            .ok_or_else(|| Error::undefined_variable(format!("{kind}@{name}")))
    }

    /// CREATEFRAME: replaces the pending temporary frame with an empty one.
    pub fn create_temporary(&mut self) {
        self.temporary = Some(Frame::new());
    }

    /// PUSHFRAME: moves the temporary frame onto the local stack.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFrame` if no temporary frame is pending.
    pub fn push_temporary(&mut self) -> Result<()> {
        let frame = self
            .temporary
            .take()
            .ok_or_else(|| Error::invalid_frame("PUSHFRAME without a temporary frame"))?;
        self.locals.push(frame);
        Ok(())
    }

    /// POPFRAME: moves the top local frame into the temporary slot,
    /// discarding whatever temporary frame was pending.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFrame` if the local stack is empty.
    pub fn pop_local(&mut self) -> Result<()> {
        let frame = self
            .locals
            .pop()
            .ok_or_else(|| Error::invalid_frame("POPFRAME with an empty local frame stack"))?;
        self.temporary = Some(frame);
        Ok(())
    }

    /// The global frame.
    #[must_use]
    pub fn global(&self) -> &Frame {
        &self.global
    }

    /// The local frame stack, bottom first.
    #[must_use]
    pub fn locals(&self) -> &[Frame] {
        &self.locals
    }

    /// The pending temporary frame, if any.
    #[must_use]
    pub fn temporary(&self) -> Option<&Frame> {
        self.temporary.as_ref()
    }

    /// Declared variables visible right now: global, top local, and
    /// temporary. Unbound variables count.
    #[must_use]
    pub fn visible_declared_count(&self) -> usize {
        self.global.len()
            + self.locals.last().map_or(0, Frame::len)
            + self.temporary.as_ref().map_or(0, Frame::len)
    }
}
