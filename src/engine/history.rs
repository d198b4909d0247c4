use super::node::NodeId;

/// What a recorded navigation step did.
///
/// Payloads hold everything resolved when the step was issued, so replaying a
/// command depends only on the node set and the command itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandKind {
    NodeSelect(NodeId),
    /// Return to the sphere, turning `recenter` toward the viewer if set.
    Escape { recenter: Option<NodeId> },
    Search { term: String, matches: Vec<NodeId> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub timestamp: u64,
}

/// Undo/redo ledger of navigation commands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<Command>,
    redo: Vec<Command>,
    next_timestamp: u64,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user-initiated command and forget anything undone.
    pub fn record(&mut self, kind: CommandKind) -> &Command {
        let timestamp = self.next_timestamp;
        self.next_timestamp += 1;
        self.redo.clear();
        self.entries.push(Command { kind, timestamp });
        &self.entries[self.entries.len() - 1]
    }

    /// Drop the newest command onto the redo stack and return the command
    /// that should be replayed in its place.
    pub fn undo(&mut self) -> Option<&Command> {
        if self.entries.len() < 2 {
            return None;
        }
        let undone = self.entries.pop()?;
        self.redo.push(undone);
        self.entries.last()
    }

    /// Move the most recently undone command back onto the history and return
    /// it for replay.
    pub fn redo(&mut self) -> Option<&Command> {
        let command = self.redo.pop()?;
        self.entries.push(command);
        self.entries.last()
    }

    pub fn can_undo(&self) -> bool {
        self.entries.len() >= 2
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn entries(&self) -> &[Command] {
        &self.entries
    }

    pub fn redo_stack(&self) -> &[Command] {
        &self.redo
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
