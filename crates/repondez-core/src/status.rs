//! Status constructors on [`Body`].
//!
//! Redirect helpers set the status and the location together.

use http::StatusCode;

use crate::body::Body;

macro_rules! status_helpers {
	($($(#[$doc:meta])* $name:ident => $status:ident;)*) => {
		impl Body {
			$(
				$(#[$doc])*
				pub fn $name(self) -> Self {
					self.with_status(StatusCode::$status)
				}
			)*
		}
	};
}

macro_rules! location_helpers {
	($($(#[$doc:meta])* $name:ident => $status:ident;)*) => {
		impl Body {
			$(
				$(#[$doc])*
				pub fn $name(self, location: impl Into<String>) -> Self {
					self.with_redirect(StatusCode::$status, location)
				}
			)*
		}
	};
}

location_helpers! {
	/// 201, with `Location` pointing at the new resource
	status_created => CREATED;
	/// 301
	status_moved_permanently => MOVED_PERMANENTLY;
	/// 302
	status_found => FOUND;
	/// 303, the usual answer to a successful form POST
	status_see_other => SEE_OTHER;
	/// 307
	status_temporary_redirect => TEMPORARY_REDIRECT;
	/// 308
	status_permanent_redirect => PERMANENT_REDIRECT;
}

status_helpers! {
	/// 202
	status_accepted => ACCEPTED;
	/// 204
	status_no_content => NO_CONTENT;
	/// 304
	status_not_modified => NOT_MODIFIED;
	/// 400
	status_bad_request => BAD_REQUEST;
	/// 401
	status_unauthorized => UNAUTHORIZED;
	/// 403
	status_forbidden => FORBIDDEN;
	/// 404
	status_not_found => NOT_FOUND;
	/// 405
	status_method_not_allowed => METHOD_NOT_ALLOWED;
	/// 406
	status_not_acceptable => NOT_ACCEPTABLE;
	/// 409
	status_conflict => CONFLICT;
	/// 410
	status_gone => GONE;
	/// 422
	status_unprocessable_entity => UNPROCESSABLE_ENTITY;
	/// 429
	status_too_many_requests => TOO_MANY_REQUESTS;
	/// 500
	status_internal_server_error => INTERNAL_SERVER_ERROR;
	/// 501
	status_not_implemented => NOT_IMPLEMENTED;
	/// 503
	status_service_unavailable => SERVICE_UNAVAILABLE;
}
