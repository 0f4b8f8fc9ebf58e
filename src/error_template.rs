use http::status::StatusCode;
use leptos::prelude::*;
use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

// Renders errors raised outside the normal view tree, such as an unmatched route.
#[component]
pub fn ErrorTemplate(#[prop(optional)] outside_errors: Option<Errors>) -> impl IntoView {
    let errors: Vec<AppError> = outside_errors
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(_, error)| error.downcast_ref::<AppError>().cloned())
        .collect();

    #[cfg(feature = "ssr")]
    {
        use leptos_axum::ResponseOptions;
        if let (Some(response), Some(first)) = (use_context::<ResponseOptions>(), errors.first()) {
            response.set_status(first.status_code());
        }
    }

    view! {
        <div class="min-h-screen flex flex-col items-center justify-center text-gray-800 dark:text-gray-200">
            <h1 class="text-2xl font-bold mb-4">
                {if errors.len() > 1 { "Errors" } else { "Error" }}
            </h1>
            {errors
                .into_iter()
                .map(|error| {
                    view! {
                        <h2 class="text-xl">{error.status_code().to_string()}</h2>
                        <p>"Error: " {error.to_string()}</p>
                    }
                })
                .collect_view()}
            <a href="/" class="mt-6 text-seafoam-600 hover:text-seafoam-700">"← Back to the lineup"</a>
        </div>
    }
}
