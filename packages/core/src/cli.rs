use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Community board command-line client
#[derive(Debug, Parser)]
#[command(
    name = "board",
    version,
    about = "Read and write posts on a community message board"
)]
pub struct Cli {
    /// Board API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Where the login session is stored
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Show generated placeholder content when the API is unreachable
    #[arg(long, global = true)]
    pub sample_fallback: bool,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account
    Signup(SignupArgs),

    /// Log out and forget the session
    Logout,

    /// List posts, newest first
    Posts {
        /// First page to show
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// How many pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Keep loading until the last page
        #[arg(long, conflicts_with = "pages")]
        all: bool,

        /// Posts per page
        #[arg(long)]
        size: Option<u32>,
    },

    /// Show a post with its comments
    Show { post_id: i64 },

    /// Write a new post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Attach an image (repeatable)
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },

    /// Edit one of your posts
    Edit {
        post_id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Replace the image
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Delete one of your posts
    Delete { post_id: i64 },

    /// Like or unlike a post
    Like { post_id: i64 },

    /// Manage comments on a post
    #[command(subcommand)]
    Comment(CommentCommand),

    /// Show or update your profile
    Profile {
        /// New nickname
        #[arg(long)]
        nickname: Option<String>,
        /// New profile image
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Change your password
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        check: String,
    },

    /// Delete your account
    Withdraw {
        /// Required; there is no undo
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub password_check: String,
    #[arg(long)]
    pub nickname: String,
    #[arg(long)]
    pub profile_image: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum CommentCommand {
    /// Add a comment
    Add { post_id: i64, content: String },

    /// Edit one of your comments
    Edit {
        post_id: i64,
        comment_id: i64,
        content: String,
    },

    /// Delete one of your comments
    Delete { post_id: i64, comment_id: i64 },
}
