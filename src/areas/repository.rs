use crate::areas::state::EngineState;
use crate::areas::store::BlobStore;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::EngineError;
use crate::artifacts::objects::Manifest;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::cell::{RefCell, RefMut};
use std::path::Path;

pub const ENGINE_DIR: &str = ".grit";

/// Facade over all engine areas rooted at a working directory
///
/// Composes the workspace, the blob store and the persistent state, and
/// carries the output writer the porcelain commands print through. State
/// is loaded once on construction and written back explicitly via
/// [`Repository::save`] after a mutating command succeeds.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    workspace: Workspace,
    store: BlobStore,
    state: Option<EngineState>,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;

        let workspace = Workspace::new(path.clone().into_boxed_path());
        let store = BlobStore::new(path.join(ENGINE_DIR).join("blobs").into_boxed_path());
        let state = EngineState::load(&path.join(ENGINE_DIR).join("state"))?;

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            workspace,
            store,
            state,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn store(&self) -> &BlobStore {
        &self.store
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Access the loaded state, failing when no engine directory exists here
    pub fn state(&self) -> anyhow::Result<&EngineState> {
        self.state
            .as_ref()
            .ok_or_else(|| EngineError::Uninitialized.into())
    }

    pub fn state_mut(&mut self) -> anyhow::Result<&mut EngineState> {
        self.state
            .as_mut()
            .ok_or_else(|| EngineError::Uninitialized.into())
    }

    /// Create the engine directory layout and the bootstrap state
    pub fn bootstrap(&mut self) -> anyhow::Result<()> {
        if self.path.join(ENGINE_DIR).exists() {
            return Err(EngineError::AlreadyInitialized.into());
        }

        std::fs::create_dir_all(self.store.blobs_path())?;

        self.state = Some(EngineState::bootstrap());
        self.save()
    }

    /// Persist the in-memory state back to disk
    pub fn save(&self) -> anyhow::Result<()> {
        self.state()?
            .save(&self.path.join(ENGINE_DIR).join("state"))
    }

    /// The commit the current branch points at
    pub fn head_commit(&self) -> anyhow::Result<&Commit> {
        let state = self.state()?;

        state.graph.require(state.branches.current_head())
    }

    pub fn head_manifest(&self) -> anyhow::Result<&Manifest> {
        self.head_commit().map(Commit::manifest)
    }

    /// Advance the current branch to the given commit
    pub fn advance_head(&mut self, commit_id: ObjectId) -> anyhow::Result<()> {
        self.state_mut()?.branches.advance(commit_id);

        Ok(())
    }
}
