//! 인메모리 저장소.
//!
//! 테스트와 데이터베이스 없이 실행하는 개발 환경에서 사용합니다.
//! 각 변경 연산은 하나의 쓰기 락 안에서 검사와 변경을 함께 수행합니다.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::BlogStore;
use crate::domain::{
    Author, Comment, CommentId, CommentWithAuthor, NewComment, NewPost, NewUser, Post,
    PostChanges, PostId, PostWithAuthor, User, UserId,
};
use crate::error::StoreError;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    posts: BTreeMap<PostId, Post>,
    comments: BTreeMap<CommentId, Comment>,
    last_user_id: UserId,
    last_post_id: PostId,
    last_comment_id: CommentId,
}

impl Tables {
    fn author_of(&self, user_id: UserId) -> Option<Author> {
        self.users.get(&user_id).map(|u| Author {
            nickname: u.nickname.clone(),
        })
    }
}

/// 인메모리 [`BlogStore`] 구현.
///
/// ID는 1부터 순차적으로 증가하며, 목록은 ID 역순(최신순)으로 반환됩니다.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// 빈 저장소 생성.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.nickname == new_user.nickname) {
            return Err(StoreError::Duplicate("users_nickname_key".to_string()));
        }

        tables.last_user_id += 1;
        let now = Utc::now();
        let user = User {
            user_id: tables.last_user_id,
            nickname: new_user.nickname,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.user_id, user.clone());

        Ok(user)
    }

    async fn find_user(&self, user_id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&user_id).cloned())
    }

    async fn find_user_by_nickname(&self, nickname: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.nickname == nickname)
            .cloned())
    }

    async fn create_post(&self, new_post: NewPost) -> Result<Post, StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&new_post.user_id) {
            return Err(StoreError::MissingReference("posts_user_id_fkey".to_string()));
        }

        tables.last_post_id += 1;
        let now = Utc::now();
        let post = Post {
            post_id: tables.last_post_id,
            user_id: new_post.user_id,
            title: new_post.title,
            content: new_post.content,
            created_at: now,
            updated_at: now,
        };
        tables.posts.insert(post.post_id, post.clone());

        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<PostWithAuthor>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .values()
            .rev()
            .filter_map(|post| {
                tables.author_of(post.user_id).map(|user| PostWithAuthor {
                    post: post.clone(),
                    user,
                })
            })
            .collect())
    }

    async fn find_post(&self, post_id: PostId) -> Result<Option<Post>, StoreError> {
        Ok(self.tables.read().await.posts.get(&post_id).cloned())
    }

    async fn find_post_with_author(
        &self,
        post_id: PostId,
    ) -> Result<Option<PostWithAuthor>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.get(&post_id).and_then(|post| {
            tables.author_of(post.user_id).map(|user| PostWithAuthor {
                post: post.clone(),
                user,
            })
        }))
    }

    async fn update_post(
        &self,
        post_id: PostId,
        owner_id: UserId,
        changes: PostChanges,
    ) -> Result<Option<Post>, StoreError> {
        let mut tables = self.tables.write().await;

        let Some(post) = tables
            .posts
            .get_mut(&post_id)
            .filter(|p| p.user_id == owner_id)
        else {
            return Ok(None);
        };

        post.title = changes.title;
        post.content = changes.content;
        post.updated_at = Utc::now();

        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, post_id: PostId, owner_id: UserId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;

        let owned = tables
            .posts
            .get(&post_id)
            .is_some_and(|p| p.user_id == owner_id);
        if !owned {
            return Ok(false);
        }

        tables.posts.remove(&post_id);
        tables.comments.retain(|_, c| c.post_id != post_id);

        Ok(true)
    }

    async fn create_comment(&self, new_comment: NewComment) -> Result<Comment, StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.posts.contains_key(&new_comment.post_id) {
            return Err(StoreError::MissingReference(
                "comments_post_id_fkey".to_string(),
            ));
        }
        if !tables.users.contains_key(&new_comment.user_id) {
            return Err(StoreError::MissingReference(
                "comments_user_id_fkey".to_string(),
            ));
        }

        tables.last_comment_id += 1;
        let now = Utc::now();
        let comment = Comment {
            comment_id: tables.last_comment_id,
            post_id: new_comment.post_id,
            user_id: new_comment.user_id,
            comment: new_comment.comment,
            created_at: now,
            updated_at: now,
        };
        tables.comments.insert(comment.comment_id, comment.clone());

        Ok(comment)
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<CommentWithAuthor>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .values()
            .rev()
            .filter(|c| c.post_id == post_id)
            .filter_map(|comment| {
                tables.author_of(comment.user_id).map(|user| CommentWithAuthor {
                    comment: comment.clone(),
                    user,
                })
            })
            .collect())
    }

    async fn find_comment(&self, comment_id: CommentId) -> Result<Option<Comment>, StoreError> {
        Ok(self.tables.read().await.comments.get(&comment_id).cloned())
    }

    async fn update_comment(
        &self,
        comment_id: CommentId,
        owner_id: UserId,
        comment: String,
    ) -> Result<Option<Comment>, StoreError> {
        let mut tables = self.tables.write().await;

        let Some(record) = tables
            .comments
            .get_mut(&comment_id)
            .filter(|c| c.user_id == owner_id)
        else {
            return Ok(None);
        };

        record.comment = comment;
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn delete_comment(
        &self,
        comment_id: CommentId,
        owner_id: UserId,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;

        let owned = tables
            .comments
            .get(&comment_id)
            .is_some_and(|c| c.user_id == owner_id);
        if owned {
            tables.comments.remove(&comment_id);
        }

        Ok(owned)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn user(store: &MemoryStore, nickname: &str) -> User {
        store
            .create_user(NewUser {
                nickname: nickname.to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap()
    }

    async fn post(store: &MemoryStore, owner: UserId, title: &str) -> Post {
        store
            .create_post(NewPost {
                user_id: owner,
                title: title.to_string(),
                content: "content".to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_nickname_rejected() {
        let store = MemoryStore::new();
        user(&store, "abc123").await;

        let result = store
            .create_user(NewUser {
                nickname: "abc123".to_string(),
                password_hash: "other".to_string(),
            })
            .await;

        assert!(matches!(result, Err(StoreError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_list_posts_newest_first_with_author() {
        let store = MemoryStore::new();
        let author = user(&store, "abc123").await;
        post(&store, author.user_id, "first").await;
        post(&store, author.user_id, "second").await;

        let posts = store.list_posts().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].post.title, "second");
        assert_eq!(posts[1].post.title, "first");
        assert_eq!(posts[0].user.nickname, "abc123");
    }

    #[tokio::test]
    async fn test_update_post_requires_owner() {
        let store = MemoryStore::new();
        let owner = user(&store, "owner1").await;
        let other = user(&store, "other1").await;
        let created = post(&store, owner.user_id, "t").await;

        let changes = PostChanges {
            title: "new".to_string(),
            content: "body".to_string(),
        };

        let denied = store
            .update_post(created.post_id, other.user_id, changes.clone())
            .await
            .unwrap();
        assert!(denied.is_none());

        let updated = store
            .update_post(created.post_id, owner.user_id, changes)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "new");
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_delete_post_cascades_comments() {
        let store = MemoryStore::new();
        let owner = user(&store, "owner1").await;
        let created = post(&store, owner.user_id, "t").await;
        let comment = store
            .create_comment(NewComment {
                post_id: created.post_id,
                user_id: owner.user_id,
                comment: "hi".to_string(),
            })
            .await
            .unwrap();

        assert!(store.delete_post(created.post_id, owner.user_id).await.unwrap());
        assert!(store.find_post(created.post_id).await.unwrap().is_none());
        assert!(store
            .find_comment(comment.comment_id)
            .await
            .unwrap()
            .is_none());

        // 두 번째 삭제는 대상 없음
        assert!(!store.delete_post(created.post_id, owner.user_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_comment_on_missing_post_rejected() {
        let store = MemoryStore::new();
        let owner = user(&store, "owner1").await;

        let result = store
            .create_comment(NewComment {
                post_id: 42,
                user_id: owner.user_id,
                comment: "hi".to_string(),
            })
            .await;

        assert!(matches!(result, Err(StoreError::MissingReference(_))));
    }

    #[tokio::test]
    async fn test_list_comments_filters_by_post() {
        let store = MemoryStore::new();
        let owner = user(&store, "owner1").await;
        let first = post(&store, owner.user_id, "a").await;
        let second = post(&store, owner.user_id, "b").await;

        for (post_id, text) in [(first.post_id, "x"), (second.post_id, "y"), (first.post_id, "z")] {
            store
                .create_comment(NewComment {
                    post_id,
                    user_id: owner.user_id,
                    comment: text.to_string(),
                })
                .await
                .unwrap();
        }

        let comments = store.list_comments(first.post_id).await.unwrap();
        let texts: Vec<&str> = comments.iter().map(|c| c.comment.comment.as_str()).collect();
        assert_eq!(texts, vec!["z", "x"]);
        assert!(comments.iter().all(|c| c.user.nickname == "owner1"));
    }
}
