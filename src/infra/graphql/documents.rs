//! Query and mutation documents sent to the GraphQL endpoint.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    pub kind: OperationKind,
    pub document: &'static str,
}

pub const FETCH_POSTS: Operation = Operation {
    name: "FetchPosts",
    kind: OperationKind::Query,
    document: r"
        query FetchPosts($page: Int) {
          getPosts(page: $page) {
            posts {
              _id
              creator { name }
              title
              content
              createdAt
              imageUrl
            }
            totalItems
          }
        }
    ",
};

pub const FETCH_POST: Operation = Operation {
    name: "FetchPost",
    kind: OperationKind::Query,
    document: r"
        query FetchPost($postId: String!) {
          getPost(postId: $postId) {
            _id
            title
            content
            imageUrl
            creator { name }
            createdAt
          }
        }
    ",
};

pub const CREATE_POST: Operation = Operation {
    name: "CreateNewPost",
    kind: OperationKind::Mutation,
    document: r"
        mutation CreateNewPost($title: String!, $content: String!, $imageUrl: String!) {
          createPost(postInput: { title: $title, content: $content, imageUrl: $imageUrl }) {
            _id
            title
            content
            imageUrl
            creator { name }
            createdAt
          }
        }
    ",
};

pub const UPDATE_POST: Operation = Operation {
    name: "UpdatePost",
    kind: OperationKind::Mutation,
    document: r"
        mutation UpdatePost($postId: ID!, $title: String!, $content: String!, $imageUrl: String!) {
          updatePost(_id: $postId, postInput: { title: $title, content: $content, imageUrl: $imageUrl }) {
            _id
            title
            content
            imageUrl
            creator { name }
            createdAt
          }
        }
    ",
};

pub const DELETE_POST: Operation = Operation {
    name: "DeletePost",
    kind: OperationKind::Mutation,
    document: r"
        mutation DeletePost($postId: ID!) {
          deletePost(_id: $postId)
        }
    ",
};

pub const FETCH_STATUS: Operation = Operation {
    name: "FetchStatus",
    kind: OperationKind::Query,
    document: r"
        query FetchStatus {
          getStatus { status }
        }
    ",
};

pub const UPDATE_STATUS: Operation = Operation {
    name: "UserStatusUpdate",
    kind: OperationKind::Mutation,
    document: r"
        mutation UserStatusUpdate($status: String!) {
          updateStatus(newStatus: $status) { status }
        }
    ",
};
