mod test_three_member_mesh;
