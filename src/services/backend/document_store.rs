use url::Url;

use crate::services::backend::settings::join_path;

/// Data-store handle for the project's default document database.
///
/// Only addressing lives here. No view reads documents yet.
#[derive(Clone, Debug)]
pub struct DocumentStore {
    documents_url: Url,
}

impl DocumentStore {
    pub fn new(endpoint: &Url, project_id: &str) -> Result<Self, url::ParseError> {
        let documents_url = join_path(
            endpoint,
            &format!("v1/projects/{project_id}/databases/(default)/documents/"),
        )?;

        Ok(Self { documents_url })
    }

    pub fn documents_url(&self) -> &Url {
        &self.documents_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> DocumentStore {
        let endpoint = Url::parse("https://firestore.googleapis.com").unwrap();
        DocumentStore::new(&endpoint, "blog-test").unwrap()
    }

    #[test]
    fn documents_root_is_default_database() {
        assert_eq!(
            store().documents_url().as_str(),
            "https://firestore.googleapis.com/v1/projects/blog-test/databases/(default)/documents/"
        );
    }
}
