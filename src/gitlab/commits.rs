use super::client::{GitLabClient, Transport, PER_PAGE};
use crate::error::Result;
use crate::model::{Commit, DateRange};
use crate::observer::Observer;
use crate::util::author_matches;
use log::Level;

impl<T: Transport> GitLabClient<T> {
    /// Commits of one project inside `range`, newest first as the server
    /// returns them. A non-empty `users` keeps only commits whose author
    /// name or email is listed.
    pub fn fetch_commits(
        &self,
        project_id: u64,
        range: &DateRange,
        users: &[String],
        observer: &dyn Observer,
    ) -> Result<Vec<Commit>> {
        observer.log(
            Level::Debug,
            &format!("Fetching commits for project ID {project_id}..."),
        );
        let since = range.since();
        let until = range.until();

        self.paginate(
            "commits",
            &format!("commits for project {project_id}"),
            |page| {
                self.endpoint(&format!(
                    "projects/{project_id}/repository/commits?since={since}&until={until}&per_page={PER_PAGE}&page={page}"
                ))
            },
            observer,
            |page: Vec<Commit>| {
                if users.is_empty() {
                    page
                } else {
                    page.into_iter()
                        .filter(|c| author_matches(users, &c.author_name, &c.author_email))
                        .collect()
                }
            },
        )
    }
}
