use chrono::{DateTime, NaiveDateTime, Utc};
use log::{info, warn};

use super::member::{MemberId, TeamMember};
use super::task::{Task, TaskId, TaskPriority};
use crate::error::BoardError;

/// Mutation requests emitted by the timeline and the forms.
///
/// Intents are applied in emission order; a drag commit emits `CreateTask`
/// before `RequestEditor` so the editor opens on a task that already exists.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    CreateTask(Task),
    UpdateTask(Task),
    DeleteTask(TaskId),
    AddMember { name: String, role: Option<String> },
    RequestEditor(TaskId),
}

/// The canonical task and member collections.
#[derive(Debug, Clone)]
pub struct Board {
    pub name: String,
    tasks: Vec<Task>,
    members: Vec<TeamMember>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            name: "Untitled Board".to_string(),
            tasks: Vec::new(),
            members: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl Board {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Tasks in store order. Hit-testing relies on this order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn member(&self, id: MemberId) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Apply one intent. `RequestEditor` carries no mutation and is left to
    /// the shell.
    pub fn apply(&mut self, intent: Intent) -> Result<(), BoardError> {
        let result = match intent {
            Intent::CreateTask(task) => self.insert_task(task).map(|_| ()),
            Intent::UpdateTask(task) => self.update_task(task),
            Intent::DeleteTask(id) => self.delete_task(id).map(|_| ()),
            Intent::AddMember { name, role } => self.add_member(&name, role.as_deref()).map(|_| ()),
            Intent::RequestEditor(_) => return Ok(()),
        };
        if let Err(err) = &result {
            warn!("event=intent_rejected error={err}");
        }
        result
    }

    pub fn insert_task(&mut self, task: Task) -> Result<TaskId, BoardError> {
        if task.is_preview() {
            return Err(BoardError::PreviewNotStorable);
        }
        let id = task.id;
        info!("event=task_created id={id} row={}", task.row_index());
        self.tasks.push(task);
        self.touch();
        Ok(id)
    }

    pub fn update_task(&mut self, task: Task) -> Result<(), BoardError> {
        let slot = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or(BoardError::UnknownTask(task.id))?;
        info!("event=task_updated id={}", task.id);
        *slot = task;
        self.touch();
        Ok(())
    }

    pub fn delete_task(&mut self, id: TaskId) -> Result<Task, BoardError> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(BoardError::UnknownTask(id))?;
        info!("event=task_deleted id={id}");
        self.touch();
        Ok(self.tasks.remove(idx))
    }

    /// Add a member; the display color follows join order.
    pub fn add_member(&mut self, name: &str, role: Option<&str>) -> Result<MemberId, BoardError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BoardError::EmptyMemberName);
        }
        let role = role.map(str::trim).filter(|r| !r.is_empty()).map(String::from);
        let member = TeamMember::new(name, role, self.members.len());
        let id = member.id;
        info!("event=member_added id={id} join_index={}", self.members.len());
        self.members.push(member);
        self.touch();
        Ok(id)
    }

    /// A demonstration board anchored at `today`.
    pub fn sample(today: NaiveDateTime) -> Self {
        let mut board = Board::new("Sample Board");
        let day = |n: i64| today + chrono::Duration::days(n);

        let roster = [
            ("Sarah Chen", "Project Manager"),
            ("Alex Rodriguez", "Lead Developer"),
            ("Maya Patel", "UI/UX Designer"),
            ("David Kim", "Backend Developer"),
        ];
        let ids: Vec<MemberId> = roster
            .iter()
            .filter_map(|(name, role)| board.add_member(name, Some(role)).ok())
            .collect();

        let mut planning = Task::new("Project Planning & Research", day(1), day(5));
        planning.assignee = ids.first().copied();
        planning.progress = Some(80);
        planning.priority = Some(TaskPriority::High);
        planning.row = Some(0);

        let mut design = Task::new("UI/UX Design System", day(3), day(10));
        design.assignee = ids.get(2).copied();
        design.progress = Some(45);
        design.priority = Some(TaskPriority::Medium);
        design.row = Some(1);

        let mut backend = Task::new("Backend API Development", day(6), day(15));
        backend.assignee = ids.get(3).copied();
        backend.progress = Some(20);
        backend.priority = Some(TaskPriority::Critical);
        backend.row = Some(2);

        board.tasks = vec![planning, design, backend];
        board
    }
}
