use crate::error::Result;
use crate::gitlab::{GitLabClient, Transport};
use crate::model::{CommitEntry, DateRange, Report};
use crate::observer::Observer;
use crate::util::project_name_matches;
use log::Level;

/// Walk every project once and collect its commits in `range`.
///
/// An empty `project_names` means all projects. Projects without matching
/// commits are left out of the report.
pub fn build_report<T: Transport>(
    client: &GitLabClient<T>,
    range: &DateRange,
    users: &[String],
    project_names: &[String],
    observer: &dyn Observer,
) -> Result<Report> {
    observer.log(Level::Info, "Generating report...");
    let projects = client.fetch_projects(observer)?;
    let total = projects.len();
    let mut report = Report::new();

    for (index, project) in projects.into_iter().enumerate() {
        let index = index + 1;
        if !project_names.is_empty() && !project_name_matches(project_names, &project.name) {
            observer.log(
                Level::Debug,
                &format!(
                    "{index}/{total} - Skipping project {} (does not match filter).",
                    project.name
                ),
            );
            continue;
        }

        observer.project_started(index, total, &project.name);
        let commits = client.fetch_commits(project.id, range, users, observer)?;
        if commits.is_empty() {
            observer.log(
                Level::Debug,
                &format!("No commits found for project: {}", project.name),
            );
            continue;
        }

        report.insert(
            project.name,
            commits.into_iter().map(CommitEntry::from).collect(),
        );
    }

    Ok(report)
}
