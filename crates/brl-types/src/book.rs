use serde::{Deserialize, Serialize};

use crate::price::Price;

/// The `(first, last)` natural key identifying an author.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorName {
    pub first: String,
    pub last: String,
}

impl AuthorName {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }
}

/// A catalog insertion request.
///
/// Author and genres are given by natural key; the catalog resolves or
/// creates the referenced rows during insertion. The avatar travels with the
/// request but is only persisted if the author row is created by it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub price: Price,
    pub pages: u16,
    pub author: AuthorName,
    pub avatar: Option<Vec<u8>>,
    pub genres: Vec<String>,
}

impl NewBook {
    pub fn new(title: impl Into<String>, price: Price, pages: u16, author: AuthorName) -> Self {
        Self {
            title: title.into(),
            price,
            pages,
            author,
            avatar: None,
            genres: Vec::new(),
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genres.push(genre.into());
        self
    }

    pub fn with_avatar(mut self, avatar: Vec<u8>) -> Self {
        self.avatar = Some(avatar);
        self
    }
}

/// The projected read model returned by filtered catalog queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub title: String,
    pub price: Price,
    pub pages: u16,
    pub author_first: String,
    pub author_last: String,
}
