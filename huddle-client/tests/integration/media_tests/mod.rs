mod test_screen_share;
