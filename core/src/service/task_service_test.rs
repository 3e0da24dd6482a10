#[cfg(test)]
mod tests {
    use crate::error::TaskError;
    use crate::model::strategy::{SortKey, SortOrder, SortStrategy};
    use crate::model::task::Task;
    use crate::repository::TaskRepository;
    use crate::service::dto::TaskDraft;
    use crate::service::task_service::TaskService;
    use crate::validation::ValidationError;
    use anyhow::Result;
    use chrono::NaiveDateTime;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use uuid::Uuid;

    #[derive(Default)]
    struct MockTaskRepo {
        tasks: RefCell<Vec<Task>>,
    }

    impl MockTaskRepo {
        fn not_found(id: Uuid) -> anyhow::Error {
            TaskError::NotFound { id }.into()
        }
    }

    impl TaskRepository for MockTaskRepo {
        fn create(&self, task: Task) -> Result<Task> {
            self.tasks.borrow_mut().push(task.clone());
            Ok(task)
        }

        fn list(&self, owner: &str) -> Result<Vec<Task>> {
            Ok(self.tasks.borrow().iter().filter(|t| t.owner == owner).cloned().collect())
        }

        fn get(&self, owner: &str, id: &Uuid) -> Result<Task> {
            self.tasks
                .borrow()
                .iter()
                .find(|t| t.id == *id && t.owner == owner)
                .cloned()
                .ok_or_else(|| Self::not_found(*id))
        }

        fn update(&self, owner: &str, task: &Task) -> Result<()> {
            let mut tasks = self.tasks.borrow_mut();
            let slot = tasks
                .iter_mut()
                .find(|t| t.id == task.id && t.owner == owner)
                .ok_or_else(|| Self::not_found(task.id))?;
            *slot = task.clone();
            Ok(())
        }

        fn delete(&self, owner: &str, id: &Uuid) -> Result<()> {
            let mut tasks = self.tasks.borrow_mut();
            let before = tasks.len();
            tasks.retain(|t| !(t.id == *id && t.owner == owner));
            if tasks.len() == before {
                return Err(Self::not_found(*id));
            }
            Ok(())
        }
    }

    const ALICE: &str = "alice@example.com";
    const BOB: &str = "bob@example.com";

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2025-01-01 12:00", "%Y-%m-%d %H:%M").unwrap()
    }

    fn draft(title: &str, due: &str) -> TaskDraft {
        TaskDraft::new(title, due)
    }

    fn validation_kind(err: &anyhow::Error) -> Option<ValidationError> {
        err.downcast_ref::<ValidationError>().copied()
    }

    fn service() -> TaskService<MockTaskRepo> {
        TaskService::new(MockTaskRepo::default())
    }

    #[test]
    fn test_add_applies_form_defaults() {
        let service = service();
        let task = service.add_task(ALICE, draft("  Deploy hotfix ", "2030-01-01"), now()).unwrap();

        assert_eq!(task.title, "Deploy hotfix");
        assert_eq!(task.owner, ALICE);
        assert_eq!(task.status, "To Do");
        assert_eq!(task.priority, "Medium");
        assert_eq!(task.severity, "Major");
        assert_eq!(task.time, None);
        assert_eq!(service.get_task(ALICE, &task.id).unwrap(), task);
    }

    #[test]
    fn test_add_rejects_past_without_writing() {
        let service = service();
        let mut d = draft("Too late", "2020-01-01");
        d.time = Some("10:00".to_string());

        let err = service.add_task(ALICE, d, now()).unwrap_err();
        assert_eq!(validation_kind(&err), Some(ValidationError::PastDateTime));
        assert_eq!(err.to_string(), "Please try to forget the Past! The date and time must be in the future.");
        assert!(service.list_tasks(ALICE, SortStrategy::default()).unwrap().is_empty());
    }

    #[test]
    fn test_add_reports_each_validation_kind() {
        let service = service();
        let cases = [
            ("2024-13-01", None, ValidationError::InvalidDateFormat),
            ("2030-01-01", Some("25:00"), ValidationError::InvalidTimeFormat),
            ("2030-02-30", None, ValidationError::InvalidDateTime),
            ("2025-01-01", Some("11:59"), ValidationError::PastDateTime),
        ];
        for (due, time, expected) in cases {
            let mut d = draft("t", due);
            d.time = time.map(str::to_string);
            let err = service.add_task(ALICE, d, now()).unwrap_err();
            assert_eq!(validation_kind(&err), Some(expected), "{due} {time:?}");
        }
    }

    #[test]
    fn test_add_rejects_blank_title() {
        let service = service();
        let err = service.add_task(ALICE, draft("   ", "2030-01-01"), now()).unwrap_err();
        assert_eq!(err.downcast_ref::<TaskError>(), Some(&TaskError::EmptyTitle));
    }

    #[test]
    fn test_add_closed_task_with_stale_date() {
        let service = service();
        let mut d = draft("Already done", "2020-01-01");
        d.status = Some("Completed".to_string());
        let task = service.add_task(ALICE, d, now()).unwrap();
        assert_eq!(task.status, "Completed");
    }

    #[test]
    fn test_edit_replaces_all_mutable_fields() {
        let service = service();
        let mut d = draft("Original", "2030-01-01");
        d.description = Some("notes".to_string());
        d.time = Some("08:00".to_string());
        d.priority = Some("High".to_string());
        let created = service.add_task(ALICE, d, now()).unwrap();

        let replacement = draft("Renamed", "2031-05-05");
        let edited = service.edit_task(ALICE, &created.id, replacement, now()).unwrap();

        assert_eq!(edited.id, created.id);
        assert_eq!(edited.title, "Renamed");
        assert_eq!(edited.due_date, "2031-05-05");
        assert_eq!(edited.description, None);
        assert_eq!(edited.time, None);
        assert_eq!(edited.priority, "Medium");
        assert_eq!(edited.created_at, created.created_at);
        assert!(edited.updated_at >= created.updated_at);
        assert_eq!(service.get_task(ALICE, &created.id).unwrap(), edited);
    }

    #[test]
    fn test_edit_seeded_from_task_changes_one_field() {
        let service = service();
        let mut d = draft("Keep me", "2030-01-01");
        d.severity = Some("Critical".to_string());
        let created = service.add_task(ALICE, d, now()).unwrap();

        let mut change = TaskDraft::from_task(&created);
        change.status = Some("In Progress".to_string());
        let edited = service.edit_task(ALICE, &created.id, change, now()).unwrap();

        assert_eq!(edited.status, "In Progress");
        assert_eq!(edited.severity, "Critical");
        assert_eq!(edited.title, "Keep me");
    }

    #[test]
    fn test_close_task_whose_date_has_passed() {
        let service = service();
        let created = service.add_task(ALICE, draft("Soon", "2025-01-02"), now()).unwrap();
        let later = NaiveDateTime::parse_from_str("2025-03-01 00:00", "%Y-%m-%d %H:%M").unwrap();

        let mut reopen = TaskDraft::from_task(&created);
        reopen.status = Some("Reopened".to_string());
        let err = service.edit_task(ALICE, &created.id, reopen, later).unwrap_err();
        assert_eq!(validation_kind(&err), Some(ValidationError::PastDateTime));
        assert_eq!(service.get_task(ALICE, &created.id).unwrap().status, "To Do");

        let mut close = TaskDraft::from_task(&created);
        close.status = Some("Canceled".to_string());
        let closed = service.edit_task(ALICE, &created.id, close, later).unwrap();
        assert_eq!(closed.status, "Canceled");
    }

    #[test]
    fn test_other_owner_cannot_touch_task() {
        let service = service();
        let created = service.add_task(ALICE, draft("Private", "2030-01-01"), now()).unwrap();

        let err = service.edit_task(BOB, &created.id, draft("Mine now", "2030-01-01"), now()).unwrap_err();
        assert_eq!(err.downcast_ref::<TaskError>(), Some(&TaskError::NotFound { id: created.id }));

        let err = service.delete_task(BOB, &created.id).unwrap_err();
        assert!(err.downcast_ref::<TaskError>().is_some());

        assert!(service.get_task(BOB, &created.id).is_err());
        assert!(service.list_tasks(BOB, SortStrategy::default()).unwrap().is_empty());
        assert_eq!(service.get_task(ALICE, &created.id).unwrap().title, "Private");
    }

    #[test]
    fn test_delete_own_task() {
        let service = service();
        let created = service.add_task(ALICE, draft("Bye", "2030-01-01"), now()).unwrap();
        service.delete_task(ALICE, &created.id).unwrap();
        assert!(service.list_tasks(ALICE, SortStrategy::default()).unwrap().is_empty());
    }

    #[test]
    fn test_list_is_ranked() {
        let service = service();
        for (title, status, priority) in [
            ("done", "Completed", "High"),
            ("todo low", "To Do", "Low"),
            ("doing", "In Progress", "Low"),
            ("todo high", "To Do", "High"),
        ] {
            let mut d = draft(title, "2030-01-01");
            d.status = Some(status.to_string());
            d.priority = Some(priority.to_string());
            service.add_task(ALICE, d, now()).unwrap();
        }
        service.add_task(BOB, draft("not alice's", "2030-01-01"), now()).unwrap();

        let titles = |strategy: SortStrategy| -> Vec<String> {
            service.list_tasks(ALICE, strategy).unwrap().into_iter().map(|t| t.title).collect()
        };

        assert_eq!(titles(SortStrategy::default()), vec!["doing", "todo high", "todo low", "done"]);
        assert_eq!(
            titles(SortStrategy::new(SortKey::Priority, SortOrder::Ascending)),
            vec!["todo high", "done", "doing", "todo low"]
        );
    }
}
