//! Model management: create, list, show, copy, delete, pull and push.

use tracing::info_span;

use crate::client::{Ollama, ResponseStream};
use crate::error::{Result, require_text};
use crate::policy::ErrorPolicy;
use crate::types::{
    CopyRequest, CreateModelRequest, CreateModelResponse, DeleteRequest, ModelList, ModelResponse,
    ProgressResponse, PullPushRequest, ShowRequest, ShowResponse,
};

const PULL_PATH: &str = "api/pull";
const PUSH_PATH: &str = "api/push";

fn create_request(name: &str, modelfile: &str, stream: bool) -> Result<CreateModelRequest> {
    require_text(name, "name")?;
    require_text(modelfile, "modelfile")?;

    Ok(CreateModelRequest {
        name: name.to_owned(),
        modelfile: modelfile.to_owned(),
        stream,
        path: None,
    })
}

fn transfer_request(request: &PullPushRequest, stream: bool) -> Result<PullPushRequest> {
    require_text(&request.name, "model name")?;

    Ok(PullPushRequest {
        stream,
        ..request.clone()
    })
}

impl Ollama {
    /// Create a model from the contents of a Modelfile.
    ///
    /// Remote creation requires any `FROM`/`ADAPTER` files to be uploaded
    /// first with [`Ollama::create_blob`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if either argument is empty
    /// and [`crate::Error::Status`] for non-2xx responses.
    pub async fn create_model(&self, name: &str, modelfile: &str) -> Result<CreateModelResponse> {
        let request = create_request(name, modelfile, false)?;
        let span = info_span!(
            target: "ollama_api",
            "create_model",
            ollama.operation = "create_model",
            ollama.model = name,
        );

        Self::fetch_json(self.post("api/create").json(&request), span).await
    }

    /// Create a model, streaming status updates. The last status is `"success"`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if either argument is empty.
    /// Transport and status errors arrive as the last item of the stream.
    pub fn create_model_stream(
        &self,
        name: &str,
        modelfile: &str,
    ) -> Result<ResponseStream<CreateModelResponse>> {
        let request = create_request(name, modelfile, true)?;
        let span = info_span!(
            target: "ollama_api",
            "create_model_stream",
            ollama.operation = "create_model_stream",
            ollama.model = name,
        );

        self.stream_json("api/create", &request, span)
    }

    /// List models that are available locally.
    ///
    /// An empty body, a `null` body or a missing `models` field all mean no models.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Status`] for non-2xx responses.
    pub async fn list_models(&self) -> Result<Vec<ModelResponse>> {
        let span = info_span!(target: "ollama_api", "list_models", ollama.operation = "list_models");

        let list: Option<ModelList> =
            Self::fetch_optional_json(self.get("api/tags"), span).await?;
        Ok(list.map(ModelList::into_models).unwrap_or_default())
    }

    /// Show the Modelfile, template, parameters, license and system prompt of a model.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if `name` is empty and
    /// [`crate::Error::Status`] for non-2xx responses.
    pub async fn show_model(&self, name: &str) -> Result<ShowResponse> {
        require_text(name, "model name")?;

        let span = info_span!(
            target: "ollama_api",
            "show_model",
            ollama.operation = "show_model",
            ollama.model = name,
        );
        let request = ShowRequest {
            name: name.to_owned(),
        };

        Self::fetch_json(self.post("api/show").json(&request), span).await
    }

    /// Copy a model under a new name.
    ///
    /// Server errors are logged and reported as `Ok(false)` rather than raised.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if either name is empty and
    /// [`crate::Error::Http`] on transport failure.
    pub async fn copy_model(&self, source: &str, destination: &str) -> Result<bool> {
        require_text(source, "source model name")?;
        require_text(destination, "destination model name")?;

        let span = info_span!(
            target: "ollama_api",
            "copy_model",
            ollama.operation = "copy_model",
            ollama.source = source,
            ollama.destination = destination,
        );
        let request = CopyRequest {
            source: source.to_owned(),
            destination: destination.to_owned(),
        };

        Self::fetch_status(
            self.post("api/copy").json(&request),
            ErrorPolicy::Suppress,
            span,
        )
        .await
    }

    /// Delete a model.
    ///
    /// Deleting a model that does not exist succeeds: a 404 whose body names
    /// the model returns `Ok(true)`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if `name` is empty and
    /// [`crate::Error::Status`] for any other non-2xx response.
    pub async fn delete_model(&self, name: &str) -> Result<bool> {
        require_text(name, "model name")?;

        let span = info_span!(
            target: "ollama_api",
            "delete_model",
            ollama.operation = "delete_model",
            ollama.model = name,
        );
        let request = DeleteRequest {
            name: name.to_owned(),
        };

        Self::fetch_status(
            self.delete("api/delete").json(&request),
            ErrorPolicy::IgnoreNotFound(name),
            span,
        )
        .await
    }

    /// Download a model from a registry and return the final status.
    ///
    /// Cancelled pulls resume where they left off when reissued.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if the name is empty and
    /// [`crate::Error::Status`] for non-2xx responses.
    pub async fn pull_model(&self, request: &PullPushRequest) -> Result<ProgressResponse> {
        self.transfer(PULL_PATH, request).await
    }

    /// Upload a model to a registry and return the final status.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if the name is empty and
    /// [`crate::Error::Status`] for non-2xx responses.
    pub async fn push_model(&self, request: &PullPushRequest) -> Result<ProgressResponse> {
        self.transfer(PUSH_PATH, request).await
    }

    /// Download a model, streaming progress.
    ///
    /// Progress is cumulative per layer digest; the client does not aggregate it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if the name is empty.
    /// Transport and status errors arrive as the last item of the stream.
    pub fn pull_model_stream(
        &self,
        request: &PullPushRequest,
    ) -> Result<ResponseStream<ProgressResponse>> {
        self.transfer_stream(PULL_PATH, request)
    }

    /// Upload a model, streaming progress.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if the name is empty.
    /// Transport and status errors arrive as the last item of the stream.
    pub fn push_model_stream(
        &self,
        request: &PullPushRequest,
    ) -> Result<ResponseStream<ProgressResponse>> {
        self.transfer_stream(PUSH_PATH, request)
    }

    async fn transfer(&self, path: &str, request: &PullPushRequest) -> Result<ProgressResponse> {
        let request = transfer_request(request, false)?;
        let span = info_span!(
            target: "ollama_api",
            "transfer",
            ollama.operation = path,
            ollama.model = %request.name,
        );

        Self::fetch_json(self.post(path).json(&request), span).await
    }

    fn transfer_stream(
        &self,
        path: &str,
        request: &PullPushRequest,
    ) -> Result<ResponseStream<ProgressResponse>> {
        let request = transfer_request(request, true)?;
        let span = info_span!(
            target: "ollama_api",
            "transfer_stream",
            ollama.operation = path,
            ollama.model = %request.name,
        );

        self.stream_json(path, &request, span)
    }
}
