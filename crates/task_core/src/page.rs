use crate::model::Task;

pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    pub page: usize,
    pub total_pages: usize,
}

/// Slice an ordered task list into the requested 1-indexed page of 10.
///
/// Out-of-range pages (including 0) come back empty rather than as an error;
/// the caller only offers in-range navigation. The source is never mutated.
pub fn paginate(tasks: &[Task], page: usize) -> TaskPage {
    let total_pages = tasks.len().div_ceil(PAGE_SIZE);
    if page == 0 || page > total_pages {
        return TaskPage {
            tasks: Vec::new(),
            page,
            total_pages,
        };
    }

    let start = (page - 1) * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(tasks.len());
    TaskPage {
        tasks: tasks[start..end].to_vec(),
        page,
        total_pages,
    }
}
