/// Fire-and-forget publish to the notification topic. No delivery
/// confirmation is observed beyond the call succeeding.
pub trait Notifier {
    fn publish(&self, topic_arn: &str, subject: &str, message: &str) -> Result<(), String>;
}
