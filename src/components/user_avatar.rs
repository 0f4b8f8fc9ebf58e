use leptos::prelude::*;

use crate::models::SessionUser;

const AVATAR_CLASSES: &str = "w-8 h-8";

/// First letter of the best available name, for users without a picture.
pub fn initial(user: &SessionUser) -> String {
    user.display_name
        .as_deref()
        .or(user.email.as_deref())
        .and_then(|name| name.chars().next())
        .unwrap_or('?')
        .to_uppercase()
        .to_string()
}

#[component]
pub fn UserAvatar(
    /// Signed-in user whose picture or initial is shown
    user: SessionUser,
) -> impl IntoView {
    let fallback_char = initial(&user);

    view! {
        <div class=format!("{} rounded-full flex items-center justify-center", AVATAR_CLASSES)>
            {if let Some(url) = user.avatar_url {
                view! {
                    <img
                        src=url
                        alt="User avatar"
                        class=format!("{} rounded-full object-cover", AVATAR_CLASSES)
                    />
                }
                    .into_any()
            } else {
                view! {
                    <div class=format!(
                        "{} bg-seafoam-500 rounded-full flex items-center justify-center text-white text-sm font-medium",
                        AVATAR_CLASSES,
                    )>{fallback_char}</div>
                }
                    .into_any()
            }}
        </div>
    }.into_any()
}
