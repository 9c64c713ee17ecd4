
mod jobs;
mod signup;
