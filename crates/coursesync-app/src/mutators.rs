//! Pure mutators over the lesson sequence
//!
//! Each function takes the current lessons and returns a new sequence with one
//! server-confirmed change applied. The input is never modified.
//!
//! All mutators are total: an unknown lesson, file or deadline id returns a
//! sequence equal to the input. Settlements may arrive in any order (a delete
//! can land after a concurrent delete already removed the target), and this
//! no-op rule is what makes the final state independent of that order.

use coursesync_core::{Deadline, DeadlineId, FileAttachment, FileId, Lesson, LessonId};

/// Apply `f` to the lesson with `lesson_id`, leaving every other lesson as is.
fn update_lesson(
    lessons: &[Lesson],
    lesson_id: LessonId,
    f: impl FnOnce(&mut Lesson),
) -> Vec<Lesson> {
    let mut next = lessons.to_vec();
    if let Some(lesson) = next.iter_mut().find(|l| l.id == lesson_id) {
        f(lesson);
    }
    next
}

// ── Lessons ──────────────────────────────────────────────────────────────────

/// Append a newly created lesson.
///
/// The service assigns unique ids, so no collision check is made.
pub fn add_lesson(lessons: &[Lesson], lesson: Lesson) -> Vec<Lesson> {
    let mut next = lessons.to_vec();
    next.push(lesson);
    next
}

/// Replace a lesson in place by its server-confirmed version, matched on the
/// confirmed lesson's own id. Location items come from the confirmed file list.
pub fn replace_lesson(lessons: &[Lesson], lesson: Lesson) -> Vec<Lesson> {
    lessons
        .iter()
        .map(|existing| {
            if existing.id == lesson.id {
                lesson.clone()
            } else {
                existing.clone()
            }
        })
        .collect()
}

pub fn remove_lesson(lessons: &[Lesson], lesson_id: LessonId) -> Vec<Lesson> {
    lessons
        .iter()
        .filter(|lesson| lesson.id != lesson_id)
        .cloned()
        .collect()
}

// ── Files ────────────────────────────────────────────────────────────────────

/// Add a file to a lesson, replacing any entry with the same id, and recompute
/// the lesson's location items.
pub fn add_file(lessons: &[Lesson], lesson_id: LessonId, file: FileAttachment) -> Vec<Lesson> {
    update_lesson(lessons, lesson_id, |lesson| {
        let mut files: Vec<FileAttachment> = lesson
            .files()
            .iter()
            .filter(|f| f.id != file.id)
            .cloned()
            .collect();
        files.push(file);
        lesson.set_files(files);
    })
}

/// Drop the file with `file_id` from a lesson. Location items are recomputed
/// even when no file matched.
pub fn remove_file(lessons: &[Lesson], lesson_id: LessonId, file_id: FileId) -> Vec<Lesson> {
    update_lesson(lessons, lesson_id, |lesson| {
        let files = lesson
            .files()
            .iter()
            .filter(|f| f.id != file_id)
            .cloned()
            .collect();
        lesson.set_files(files);
    })
}

/// Replace `file_id` with its edited version: remove, then add.
pub fn edit_file(
    lessons: &[Lesson],
    lesson_id: LessonId,
    file_id: FileId,
    file: FileAttachment,
) -> Vec<Lesson> {
    let removed = remove_file(lessons, lesson_id, file_id);
    add_file(&removed, lesson_id, file)
}

// ── Deadlines ────────────────────────────────────────────────────────────────

/// Add a deadline to a lesson, replacing any entry with the same id.
pub fn add_deadline(lessons: &[Lesson], lesson_id: LessonId, deadline: Deadline) -> Vec<Lesson> {
    update_lesson(lessons, lesson_id, |lesson| {
        lesson.deadlines.retain(|d| d.id != deadline.id);
        lesson.deadlines.push(deadline);
    })
}

pub fn remove_deadline(
    lessons: &[Lesson],
    lesson_id: LessonId,
    deadline_id: DeadlineId,
) -> Vec<Lesson> {
    update_lesson(lessons, lesson_id, |lesson| {
        lesson.deadlines.retain(|d| d.id != deadline_id);
    })
}

/// Replace `deadline_id` with its edited version: remove, then add.
pub fn edit_deadline(
    lessons: &[Lesson],
    lesson_id: LessonId,
    deadline_id: DeadlineId,
    deadline: Deadline,
) -> Vec<Lesson> {
    let removed = remove_deadline(lessons, lesson_id, deadline_id);
    add_deadline(&removed, lesson_id, deadline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursesync_core::project_locations;

    fn file(id: u64) -> FileAttachment {
        FileAttachment {
            id: FileId(id),
            name: None,
            file: format!("https://cdn.test/media/file-{id}.pdf"),
            created_at: None,
        }
    }

    fn deadline(id: u64, name: &str) -> Deadline {
        Deadline {
            id: DeadlineId(id),
            name: name.to_string(),
            description: String::new(),
            begin: None,
            end: "2024-05-01T12:00:00Z".parse().unwrap(),
        }
    }

    fn lesson(id: u64, files: Vec<FileAttachment>) -> Lesson {
        Lesson::new(LessonId(id), format!("Lesson {id}"), "").with_files(files)
    }

    fn fixture() -> Vec<Lesson> {
        vec![
            lesson(1, vec![file(10)]),
            lesson(2, vec![file(20), file(21)]).with_deadlines(vec![deadline(5, "Quiz")]),
        ]
    }

    fn file_ids(lesson: &Lesson) -> Vec<u64> {
        lesson.files().iter().map(|f| f.id.0).collect()
    }

    fn assert_projection_consistent(lessons: &[Lesson]) {
        for lesson in lessons {
            assert_eq!(lesson.location_items(), project_locations(lesson.files()));
        }
    }

    // ─────────────────────────────────────────────────────────
    // Lessons
    // ─────────────────────────────────────────────────────────

    #[test]
    fn test_add_lesson_appends_and_keeps_input() {
        let lessons = fixture();
        let next = add_lesson(&lessons, lesson(3, vec![]));

        let ids: Vec<_> = next.iter().map(|l| l.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(lessons.len(), 2);
    }

    #[test]
    fn test_replace_lesson_in_place_uses_confirmed_files() {
        let lessons = fixture();
        let confirmed = Lesson::new(LessonId(1), "Renamed", "new").with_files(vec![file(11)]);

        let next = replace_lesson(&lessons, confirmed);

        assert_eq!(next[0].name, "Renamed");
        assert_eq!(file_ids(&next[0]), vec![11]);
        assert_eq!(next[0].location_items()[0].file_id, FileId(11));
        assert_eq!(next[1], lessons[1]);
        assert_projection_consistent(&next);
    }

    #[test]
    fn test_replace_lesson_matches_confirmed_id() {
        let lessons = fixture();
        let confirmed = Lesson::new(LessonId(2), "B edited", "");

        let next = replace_lesson(&lessons, confirmed);

        let ids: Vec<_> = next.iter().map(|l| l.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(next[0], lessons[0]);
        assert_eq!(next[1].name, "B edited");
    }

    #[test]
    fn test_remove_lesson() {
        let next = remove_lesson(&fixture(), LessonId(1));
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id, LessonId(2));
    }

    // ─────────────────────────────────────────────────────────
    // Files
    // ─────────────────────────────────────────────────────────

    #[test]
    fn test_add_file_appends_and_projects() {
        let next = add_file(&fixture(), LessonId(1), file(12));
        assert_eq!(file_ids(&next[0]), vec![10, 12]);
        assert_eq!(next[0].location_items().len(), 2);
        assert_projection_consistent(&next);
    }

    #[test]
    fn test_add_file_with_existing_id_replaces() {
        let mut replacement = file(10);
        replacement.name = Some("Updated".to_string());

        let next = add_file(&fixture(), LessonId(1), replacement);

        assert_eq!(file_ids(&next[0]), vec![10]);
        assert_eq!(next[0].location_items()[0].title, "Updated");
    }

    #[test]
    fn test_remove_file_empties_projection() {
        let next = remove_file(&fixture(), LessonId(1), FileId(10));
        assert!(next[0].files().is_empty());
        assert!(next[0].location_items().is_empty());
        assert_eq!(next[1], fixture()[1]);
    }

    #[test]
    fn test_remove_file_is_idempotent() {
        let once = remove_file(&fixture(), LessonId(2), FileId(20));
        let twice = remove_file(&once, LessonId(2), FileId(20));
        assert_eq!(once, twice);
        assert_eq!(file_ids(&twice[1]), vec![21]);
    }

    #[test]
    fn test_edit_file_yields_exactly_one_entry() {
        let mut edited = file(20);
        edited.file = "https://cdn.test/media/renamed.png".to_string();

        let next = edit_file(&fixture(), LessonId(2), FileId(20), edited.clone());

        let matching: Vec<_> = next[1].files().iter().filter(|f| f.id == FileId(20)).collect();
        assert_eq!(matching, vec![&edited]);
        assert_eq!(file_ids(&next[1]), vec![21, 20]);
        assert_projection_consistent(&next);
    }

    #[test]
    fn test_edit_file_with_new_server_id() {
        let next = edit_file(&fixture(), LessonId(1), FileId(10), file(13));
        assert_eq!(file_ids(&next[0]), vec![13]);
    }

    #[test]
    fn test_add_remove_sequence_keeps_each_survivor_once() {
        let mut lessons = vec![lesson(1, vec![])];
        let ops: &[(bool, u64)] = &[
            (true, 1),
            (true, 2),
            (true, 3),
            (false, 2),
            (true, 2),
            (true, 1),
            (false, 3),
            (false, 3),
            (true, 4),
        ];
        for &(add, id) in ops {
            lessons = if add {
                add_file(&lessons, LessonId(1), file(id))
            } else {
                remove_file(&lessons, LessonId(1), FileId(id))
            };
            assert_projection_consistent(&lessons);
        }

        let mut ids = file_ids(&lessons[0]);
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    // ─────────────────────────────────────────────────────────
    // Deadlines
    // ─────────────────────────────────────────────────────────

    #[test]
    fn test_add_deadline_does_not_touch_locations() {
        let lessons = fixture();
        let next = add_deadline(&lessons, LessonId(1), deadline(6, "Essay"));
        assert_eq!(next[0].deadlines.len(), 1);
        assert_eq!(next[0].location_items(), lessons[0].location_items());
    }

    #[test]
    fn test_remove_deadline_is_idempotent() {
        let once = remove_deadline(&fixture(), LessonId(2), DeadlineId(5));
        let twice = remove_deadline(&once, LessonId(2), DeadlineId(5));
        assert!(once[1].deadlines.is_empty());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_edit_deadline_yields_exactly_one_entry() {
        let next = edit_deadline(&fixture(), LessonId(2), DeadlineId(5), deadline(5, "Final quiz"));
        assert_eq!(next[1].deadlines.len(), 1);
        assert_eq!(next[1].deadlines[0].name, "Final quiz");
    }

    // ─────────────────────────────────────────────────────────
    // Missing ids
    // ─────────────────────────────────────────────────────────

    #[test]
    fn test_unknown_lesson_id_is_noop_for_every_mutator() {
        let lessons = fixture();
        let missing = LessonId(99);

        assert_eq!(replace_lesson(&lessons, lesson(99, vec![])), lessons);
        assert_eq!(remove_lesson(&lessons, missing), lessons);
        assert_eq!(add_file(&lessons, missing, file(1)), lessons);
        assert_eq!(remove_file(&lessons, missing, FileId(10)), lessons);
        assert_eq!(edit_file(&lessons, missing, FileId(10), file(10)), lessons);
        assert_eq!(add_deadline(&lessons, missing, deadline(1, "x")), lessons);
        assert_eq!(remove_deadline(&lessons, missing, DeadlineId(5)), lessons);
        assert_eq!(
            edit_deadline(&lessons, missing, DeadlineId(5), deadline(5, "x")),
            lessons
        );
    }

    #[test]
    fn test_unknown_child_id_is_noop() {
        let lessons = fixture();
        assert_eq!(remove_file(&lessons, LessonId(1), FileId(99)), lessons);
        assert_eq!(remove_deadline(&lessons, LessonId(2), DeadlineId(99)), lessons);
    }
}
