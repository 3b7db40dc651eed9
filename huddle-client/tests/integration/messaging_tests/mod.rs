mod test_chat_passthrough;
