//! Subcommand dispatch: run the matching page controller and print the result.

use crate::cli::{CommentCommand, Command, SignupArgs};
use crate::config::Config;
use crate::error::AppError;
use crate::pages::login;
use crate::pages::password_edit::{self, PasswordForm};
use crate::pages::post_create::{self, PostForm};
use crate::pages::post_detail::PostDetailView;
use crate::pages::post_edit::{self, PostEdit};
use crate::pages::post_list::PostFeed;
use crate::pages::profile_edit;
use crate::pages::require_login;
use crate::pages::signup::{self, SignupForm};
use crate::render;
use crate::services::provider::BoardApi;

pub async fn run(command: Command, api: &dyn BoardApi, config: &Config) -> Result<(), AppError> {
    match command {
        Command::Login { email, password } => {
            let data = login::login(api, &email, &password).await?;
            println!("Welcome, {}!", data.nickname);
        }

        Command::Signup(args) => run_signup(api, args).await?,

        Command::Logout => {
            login::logout(api).await?;
            println!("Logged out.");
        }

        Command::Posts {
            page,
            pages,
            all,
            size,
        } => {
            require_login(api).await?;
            // Sample pages never end, so walking every page needs the real feed.
            let mut feed = PostFeed::new(size.unwrap_or(config.page_size))
                .starting_at(page)
                .with_sample_fallback(config.sample_fallback && !all);

            let posts = if all {
                let mut posts = Vec::new();
                while feed.has_more() {
                    let batch = feed.load_next(api).await?;
                    if batch.is_empty() {
                        break;
                    }
                    posts.extend(batch);
                }
                posts
            } else {
                feed.load_pages(api, pages).await?
            };

            println!("{}", render::post_list(&posts));
            if feed.has_more() && !all {
                println!(
                    "\n-- more posts: board posts --page {} --",
                    feed.current_page() + 1
                );
            }
        }

        Command::Show { post_id } => {
            require_login(api).await?;
            let view = PostDetailView::load(api, post_id, config.sample_fallback).await?;
            println!("{}", render::post_detail(&view));
        }

        Command::Create {
            title,
            content,
            images,
        } => {
            require_login(api).await?;
            let created = post_create::create_post(
                api,
                &PostForm {
                    title,
                    content,
                    images,
                },
            )
            .await?;
            println!("Post #{} created.", created.post_id);
        }

        Command::Edit {
            post_id,
            title,
            content,
            image,
        } => {
            require_login(api).await?;
            post_edit::edit_post(
                api,
                post_id,
                &PostEdit {
                    title,
                    content,
                    image,
                },
            )
            .await?;
            let view = PostDetailView::load(api, post_id, false).await?;
            println!("{}", render::post_detail(&view));
        }

        Command::Delete { post_id } => {
            require_login(api).await?;
            let view = PostDetailView::load(api, post_id, false).await?;
            view.delete_post(api).await?;
            println!("Post #{} deleted.", post_id);
        }

        Command::Like { post_id } => {
            require_login(api).await?;
            let mut view = PostDetailView::load(api, post_id, false).await?;
            let liked = view.toggle_like(api).await?;
            println!(
                "{} post #{} ({} likes).",
                if liked { "Liked" } else { "Unliked" },
                post_id,
                crate::format::format_count(view.post.likes)
            );
        }

        Command::Comment(action) => {
            require_login(api).await?;
            run_comment(api, action).await?;
        }

        Command::Profile { nickname, image } => {
            require_login(api).await?;
            let profile = if nickname.is_none() && image.is_none() {
                profile_edit::show_profile(api).await?
            } else {
                let updated =
                    profile_edit::update_profile(api, nickname.as_deref(), image.as_deref())
                        .await?;
                println!("Profile updated.");
                updated
            };
            println!("{}", render::profile(&profile));
        }

        Command::Password {
            current,
            new,
            check,
        } => {
            require_login(api).await?;
            password_edit::change_password(api, &PasswordForm { current, new, check }).await?;
            println!("Password changed.");
        }

        Command::Withdraw { yes } => {
            require_login(api).await?;
            if !yes {
                return Err(AppError::NotPermitted(
                    "account deletion needs --yes".to_string(),
                ));
            }
            profile_edit::withdraw(api).await?;
            println!("Your account has been deleted.");
        }
    }

    Ok(())
}

async fn run_signup(api: &dyn BoardApi, args: SignupArgs) -> Result<(), AppError> {
    let form = SignupForm {
        email: args.email,
        password: args.password,
        password_check: args.password_check,
        nickname: args.nickname,
        profile_image: args.profile_image,
    };

    let problems = form.problems();
    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("{}: {}", problem.field, problem);
        }
        return Err(problems[0].clone().into());
    }

    if let Err(err) = signup::signup(api, &form).await {
        for (field, message) in signup::field_messages(&err) {
            eprintln!("{}: * {}", field, message);
        }
        return Err(err);
    }

    println!("Signed up. You can now log in with `board login`.");
    Ok(())
}

async fn run_comment(api: &dyn BoardApi, action: CommentCommand) -> Result<(), AppError> {
    let post_id = match &action {
        CommentCommand::Add { post_id, .. }
        | CommentCommand::Edit { post_id, .. }
        | CommentCommand::Delete { post_id, .. } => *post_id,
    };
    let mut view = PostDetailView::load(api, post_id, false).await?;

    match action {
        CommentCommand::Add { content, .. } => view.submit_comment(api, &content).await?,
        CommentCommand::Edit {
            comment_id,
            content,
            ..
        } => view.edit_comment(api, comment_id, &content).await?,
        CommentCommand::Delete { comment_id, .. } => view.delete_comment(api, comment_id).await?,
    }

    println!("{}", render::post_detail(&view));
    Ok(())
}
